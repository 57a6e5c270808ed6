//! External collaborators: the AI tutor and the auth backend.
//!
//! Both live outside this crate. The traits here are the seams the UI talks
//! through; the helpers turn any collaborator failure into a short message
//! so the rest of the lesson keeps working.

use eduscope_logic::profile::{greeting, UserProfile};

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("network unreachable: {0}")]
    Network(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Service(String),
}

/// Generative tutor backend.
pub trait TutorClient {
    fn ask(&mut self, prompt: &str, topic_hint: Option<&str>) -> Result<String, CollaboratorError>;
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Identity backend.
pub trait AuthProvider {
    fn sign_in(&mut self, credentials: &Credentials) -> Result<UserProfile, CollaboratorError>;
    fn sign_out(&mut self);
    fn current_user(&self) -> Option<&UserProfile>;
}

/// Greeting for whoever is signed in right now.
pub fn greeting_for<A: AuthProvider>(auth: &A) -> String {
    greeting(auth.current_user())
}

/// Sign in and return the greeting, or a message explaining the failure.
pub fn sign_in_with_message<A: AuthProvider>(
    auth: &mut A,
    credentials: &Credentials,
) -> Result<String, String> {
    match auth.sign_in(credentials) {
        Ok(profile) => {
            log::info!("Signed in as {}", profile.username);
            Ok(greeting(Some(&profile)))
        }
        Err(e) => {
            log::warn!("Sign-in failed: {}", e);
            Err(format!("Sign-in failed: {e}"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Learner,
    Tutor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
    /// True when the tutor turn is a failure message rather than an answer.
    pub is_error: bool,
}

/// Chat transcript with the tutor.
pub struct TutorChat<T: TutorClient> {
    client: T,
    topic_hint: Option<String>,
    transcript: Vec<ChatTurn>,
}

impl<T: TutorClient> TutorChat<T> {
    pub fn new(client: T, topic_hint: Option<String>) -> Self {
        Self {
            client,
            topic_hint,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn set_topic_hint(&mut self, hint: Option<String>) {
        self.topic_hint = hint;
    }

    /// Send a learner message; returns the tutor's turn. Blank prompts are ignored.
    pub fn send(&mut self, prompt: &str) -> Option<&ChatTurn> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }
        self.transcript.push(ChatTurn {
            speaker: Speaker::Learner,
            text: prompt.to_string(),
            is_error: false,
        });

        let reply = match self.client.ask(prompt, self.topic_hint.as_deref()) {
            Ok(text) => ChatTurn {
                speaker: Speaker::Tutor,
                text,
                is_error: false,
            },
            Err(e) => {
                log::warn!("Tutor request failed: {}", e);
                ChatTurn {
                    speaker: Speaker::Tutor,
                    text: format!("The tutor is unavailable right now: {e}"),
                    is_error: true,
                }
            }
        };
        self.transcript.push(reply);
        self.transcript.last()
    }
}
