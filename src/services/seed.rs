// src/services/seed.rs

//! The fixed question set installed by every refresh.

use crate::{
    error::AppError,
    models::question::{
        AnswerKey, CreateQuestionRequest, Difficulty,
        Difficulty::{Easy as E, Medium as M},
        NewQuestion,
    },
};

pub const SEED_CATEGORY: &str = "Cybersecurity";

/// 15 Easy, 5 Medium, in question order.
const DIFFICULTY_PATTERN: [Difficulty; 20] = [
    E, E, E, E, E, //
    M, E, M, E, E, //
    E, M, E, E, M, //
    E, E, M, E, E,
];

/// (question, options, correct option text)
const QUESTIONS: [(&str, [&str; 4], &str); 20] = [
    (
        "What is a computer virus?",
        [
            "Hardware problem",
            "A software program that harms a computer",
            "An operating system",
            "A network device",
        ],
        "A software program that harms a computer",
    ),
    (
        "What does a password protect?",
        ["Monitor", "Internet speed", "User account", "Keyboard"],
        "User account",
    ),
    (
        "Which device connects computers in a network?",
        ["Printer", "Switch", "Scanner", "Monitor"],
        "Switch",
    ),
    (
        "What is the Internet?",
        ["Single computer", "Collection of networks", "Software", "Virus"],
        "Collection of networks",
    ),
    (
        "What does Wi-Fi allow?",
        [
            "Wired connection",
            "Wireless internet access",
            "Virus protection",
            "File deletion",
        ],
        "Wireless internet access",
    ),
    (
        "What is a SQL injection attack?",
        [
            "Injecting medicine into databases",
            "Inserting malicious code into database queries",
            "Adding new SQL software",
            "Updating database records",
        ],
        "Inserting malicious code into database queries",
    ),
    (
        "What is hacking?",
        [
            "Fixing a computer",
            "Unauthorized access to systems",
            "Installing software",
            "Updating OS",
        ],
        "Unauthorized access to systems",
    ),
    (
        "What does DDoS stand for?",
        [
            "Direct Denial of Service",
            "Distributed Denial of Service",
            "Data Denial of Service",
            "Dynamic Denial of Service",
        ],
        "Distributed Denial of Service",
    ),
    (
        "What is an IP address?",
        [
            "Password",
            "Network device",
            "Unique address of a computer",
            "Virus",
        ],
        "Unique address of a computer",
    ),
    (
        "What does antivirus software do?",
        [
            "Increases internet speed",
            "Removes viruses",
            "Creates files",
            "Connects networks",
        ],
        "Removes viruses",
    ),
    (
        "Which one is an example of personal information?",
        ["Website name", "Phone number", "Browser", "Search engine"],
        "Phone number",
    ),
    (
        "What is social engineering in cybersecurity?",
        [
            "Building social networks",
            "Manipulating people to reveal confidential information",
            "Engineering social media platforms",
            "Creating social software",
        ],
        "Manipulating people to reveal confidential information",
    ),
    (
        "What should you do before clicking a link?",
        ["Ignore it", "Check the source", "Share it", "Download it"],
        "Check the source",
    ),
    (
        "What is email used for?",
        [
            "Playing games",
            "Sending messages",
            "Virus scanning",
            "Network routing",
        ],
        "Sending messages",
    ),
    (
        "What is a zero-day vulnerability?",
        [
            "A vulnerability that takes zero days to fix",
            "A security flaw unknown to security vendors",
            "A vulnerability that occurs on day zero",
            "A harmless security issue",
        ],
        "A security flaw unknown to security vendors",
    ),
    (
        "What is phishing?",
        [
            "Catching fish online",
            "Fraudulent attempt to steal personal information",
            "Network protocol",
            "Computer hardware",
        ],
        "Fraudulent attempt to steal personal information",
    ),
    (
        "What does HTTPS mean?",
        [
            "HyperText Transfer Protocol Secure",
            "High Transfer Text Protocol",
            "HyperText Transport Protocol",
            "High Tech Transfer Protocol",
        ],
        "HyperText Transfer Protocol Secure",
    ),
    (
        "What is ransomware?",
        [
            "Free software for everyone",
            "Malware that encrypts files and demands payment",
            "Antivirus protection software",
            "Operating system update",
        ],
        "Malware that encrypts files and demands payment",
    ),
    (
        "What is two-factor authentication?",
        [
            "Using two passwords",
            "Additional security layer requiring two forms of verification",
            "Two antivirus programs",
            "Two computers",
        ],
        "Additional security layer requiring two forms of verification",
    ),
    (
        "What should you do if you receive a suspicious email?",
        [
            "Open all attachments",
            "Reply immediately",
            "Delete it or report as spam",
            "Forward to friends",
        ],
        "Delete it or report as spam",
    ),
];

/// Builds the seed set. Answers are written as option text and resolved to indices here.
pub fn fresh_questions() -> Result<Vec<NewQuestion>, AppError> {
    QUESTIONS
        .iter()
        .zip(DIFFICULTY_PATTERN)
        .map(|((text, options, answer), difficulty)| {
            seed_question(text, options, AnswerKey::Text(answer.to_string()), difficulty)
        })
        .collect()
}

/// One seed entry through the same validation as the admin API.
/// `answer` may be the option index or its text.
fn seed_question(
    text: &str,
    options: &[&str; 4],
    answer: AnswerKey,
    difficulty: Difficulty,
) -> Result<NewQuestion, AppError> {
    CreateQuestionRequest {
        question_text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: answer,
        category: Some(SEED_CATEGORY.to_string()),
        difficulty: Some(difficulty),
    }
    .into_new_question()
}
