//! The classic trivia sample data set: six categories and nineteen questions
//! with their canonical ids.

use trivia_core::model::{Category, CategoryId, Question, QuestionId};

use crate::repository::{Storage, StorageError};

const CATEGORIES: &[(u64, &str)] = &[
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

// (id, question, answer, category, difficulty)
const QUESTIONS: &[(u64, &str, &str, i64, i64)] = &[
    (2, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
    (4, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
    (5, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    (6, "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
    (9, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    (10, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    (11, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    (12, "Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    (13, "What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    (14, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    (15, "The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    (16, "Which Dutch graphic artist–initials M C was a creator of optical illusions?", "Escher", 2, 1),
    (17, "La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    (18, "How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    (19, "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    (20, "What is the heaviest organ in the human body?", "The Liver", 1, 4),
    (21, "Who discovered penicillin?", "Alexander Fleming", 1, 3),
    (22, "Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    (23, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

/// Sample categories, ordered by id.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if a built-in row fails validation.
pub fn sample_categories() -> Result<Vec<Category>, StorageError> {
    CATEGORIES
        .iter()
        .map(|(id, kind)| {
            Category::new(CategoryId::new(*id), *kind)
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .collect()
}

/// Sample questions, ordered by id.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if a built-in row fails validation.
pub fn sample_questions() -> Result<Vec<Question>, StorageError> {
    QUESTIONS
        .iter()
        .map(|(id, question, answer, category, difficulty)| {
            Question::from_persisted(
                QuestionId::new(*id),
                (*question).to_owned(),
                (*answer).to_owned(),
                *category,
                *difficulty,
            )
            .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .collect()
}

/// Load the sample data into `storage`. Safe to run repeatedly.
///
/// # Errors
///
/// Returns `StorageError` if any row cannot be written.
pub async fn seed_sample(storage: &Storage) -> Result<(), StorageError> {
    for category in sample_categories()? {
        storage.categories.upsert_category(&category).await?;
    }
    for question in sample_questions()? {
        storage.questions.upsert_question(&question).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rows_validate() {
        assert_eq!(sample_categories().unwrap().len(), 6);
        let questions = sample_questions().unwrap();
        assert_eq!(questions.len(), 19);
        assert!(questions.windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[test]
    fn sports_holds_ten_and_eleven() {
        let sports: Vec<u64> = sample_questions()
            .unwrap()
            .iter()
            .filter(|q| q.category() == CategoryId::new(6))
            .map(|q| q.id().value())
            .collect();
        assert_eq!(sports, vec![10, 11]);
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let storage = Storage::in_memory();
        seed_sample(&storage).await.unwrap();
        seed_sample(&storage).await.unwrap();
        assert_eq!(storage.questions.count_questions().await.unwrap(), 19);
        assert_eq!(storage.categories.list_categories().await.unwrap().len(), 6);
    }
}
