//! Curated question sets.

use crate::{Language, Question};

/// Questions from the national sample survey household schedule, offered on the
/// builder palette for drag-and-drop.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::multiple_choice(
            "nss_1",
            "What is your household's primary source of income?",
            ["Agriculture", "Business", "Salary/Wages", "Pension", "Other"],
        )
        .with_translation(Language::Hindi, "आपके परिवार की आय का मुख्य स्रोत क्या है?"),
        Question::number(
            "nss_2",
            "How many members are there in your household?",
            Some(1),
            Some(20),
        )
        .with_translation(Language::Hindi, "आपके परिवार में कितने सदस्य हैं?"),
        Question::multiple_choice(
            "nss_3",
            "What is the highest level of education completed by the household head?",
            [
                "No formal education",
                "Primary",
                "Secondary",
                "Higher Secondary",
                "Graduate",
                "Post-graduate",
            ],
        ),
        Question::multiple_select(
            "nss_4",
            "Does your household own any of the following assets?",
            [
                "Television",
                "Refrigerator",
                "Two-wheeler",
                "Four-wheeler",
                "Computer/Laptop",
            ],
        ),
        Question::rating(
            "nss_5",
            "What is your opinion about the government's digital initiatives?",
            5,
        ),
    ]
}

/// Find a catalog question by id.
pub fn find_sample(id: &str) -> Option<Question> {
    sample_questions().into_iter().find(|q| q.id() == id)
}

/// The fixed question set returned by mock generation.
pub fn generated_questions() -> Vec<Question> {
    vec![
        Question::multiple_select(
            "ai_1",
            "What digital payment methods do you use regularly?",
            [
                "UPI (PhonePe/GPay)",
                "Credit/Debit Card",
                "Mobile Wallet",
                "Net Banking",
                "Cash Only",
            ],
        ),
        Question::rating(
            "ai_2",
            "How comfortable are you with using government digital services?",
            5,
        ),
        Question::multiple_choice(
            "ai_3",
            "What is your age group?",
            ["18-25", "26-35", "36-50", "51-65", "65+"],
        ),
        Question::multiple_select(
            "ai_4",
            "What challenges do you face when using digital services?",
            [
                "Language barriers",
                "Technical difficulties",
                "Internet connectivity",
                "Security concerns",
                "Lack of awareness",
            ],
        ),
    ]
}
