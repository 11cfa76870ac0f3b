//! # educred-agent — Free-Text Command Interpreter
//!
//! Maps a free-text command to a canned reply and an optional navigation
//! route. The matcher is an ordered list of (predicate, responder) rules
//! evaluated top to bottom over the lowercased input, terminating at the
//! first match. Order is load-bearing: "verify my certificate then issue
//! one" matches the verify rule because it comes first. No rule matching
//! yields the fixed "didn't understand" reply.
//!
//! The verify rule additionally extracts a `token <digits>` phrase, if
//! present, so the verification surface can be pre-filled.

use educred_core::TokenId;
use serde::{Deserialize, Serialize};

/// Navigation target a reply can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "route")]
pub enum Route {
    MyCertificates,
    Verify { token: Option<TokenId> },
    Issue,
    BulkIssue,
    Home,
    Admin,
}

/// Reply to one command: a message, plus a route when the command navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub message: String,
    pub action: Option<Route>,
}

struct Rule {
    matches: fn(&str) -> bool,
    respond: fn(&str) -> CommandReply,
}

/// The matcher table. First match wins; later rules never see input an
/// earlier rule claimed.
const RULES: &[Rule] = &[
    // Certificate viewing
    Rule {
        matches: |c| c.contains("show") && (c.contains("certificate") || c.contains("credential")),
        respond: |_| CommandReply {
            message: "I'll show you your certificates. Navigating to your certificate portfolio now."
                .into(),
            action: Some(Route::MyCertificates),
        },
    },
    // Certificate verification, with optional token prefill
    Rule {
        matches: |c| c.contains("verify") && c.contains("certificate"),
        respond: |c| match extract_token_id(c) {
            Some(token) => CommandReply {
                message: format!(
                    "I'll verify certificate token {token} for you. Navigating to the verification page."
                ),
                action: Some(Route::Verify { token: Some(token) }),
            },
            None => CommandReply {
                message:
                    "I'll take you to the certificate verification page where you can enter a token ID."
                        .into(),
                action: Some(Route::Verify { token: None }),
            },
        },
    },
    // Certificate issuance
    Rule {
        matches: |c| c.contains("issue") && (c.contains("certificate") || c.contains("credential")),
        respond: |_| CommandReply {
            message: "I'll help you issue a new certificate. Taking you to the certificate issuance page."
                .into(),
            action: Some(Route::Issue),
        },
    },
    // Bulk issuance
    Rule {
        matches: |c| c.contains("bulk") && c.contains("issue"),
        respond: |_| CommandReply {
            message: "I'll take you to the bulk certificate issuance page where you can upload a CSV file."
                .into(),
            action: Some(Route::BulkIssue),
        },
    },
    // Navigation
    Rule {
        matches: |c| c.contains("home") || c.contains("dashboard"),
        respond: |_| CommandReply {
            message: "Taking you to the home page.".into(),
            action: Some(Route::Home),
        },
    },
    Rule {
        matches: |c| c.contains("admin"),
        respond: |_| CommandReply {
            message: "Navigating to the admin dashboard.".into(),
            action: Some(Route::Admin),
        },
    },
    // Help
    Rule {
        matches: |c| c.contains("help") || c.contains("guide") || c.contains("how"),
        respond: |_| CommandReply {
            message: "I can help you with certificate management on EduCred. You can ask me to \
                      show your certificates, verify a certificate by token ID, issue new \
                      certificates, or navigate to different sections of the platform. What \
                      would you like to do?"
                .into(),
            action: None,
        },
    },
    // Greeting
    Rule {
        matches: |c| c.contains("hello") || c.contains("hi") || c.contains("hey"),
        respond: |_| CommandReply {
            message: "Hello! I'm your EduCred assistant. I can help you manage certificates, \
                      verify credentials, and navigate the platform. What would you like to do \
                      today?"
                .into(),
            action: None,
        },
    },
];

/// Interpret one command.
pub fn interpret(command: &str) -> CommandReply {
    let lowered = command.to_lowercase();
    for rule in RULES {
        if (rule.matches)(&lowered) {
            return (rule.respond)(&lowered);
        }
    }
    CommandReply {
        message: "I'm not sure I understood that command. You can ask me to show your \
                  certificates, verify a certificate, issue new certificates, or get help with \
                  navigation. What would you like to do?"
            .into(),
        action: None,
    }
}

/// Extract the first `token <digits>` phrase. Requires whitespace between
/// the word and the digits, as the verification surface prompts for.
fn extract_token_id(input: &str) -> Option<TokenId> {
    let mut rest = input;
    while let Some(pos) = rest.find("token") {
        let after = &rest[pos + "token".len()..];
        let digits_part = after.trim_start();
        if digits_part.len() < after.len() {
            let digits: String = digits_part
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if let Ok(id) = digits.parse::<u64>() {
                return Some(TokenId(id));
            }
        }
        rest = after;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_certificates_routes_to_portfolio() {
        let reply = interpret("Show me my certificates");
        assert_eq!(reply.action, Some(Route::MyCertificates));
        assert!(!reply.message.is_empty());
    }

    #[test]
    fn verify_with_token_prefills_the_id() {
        let reply = interpret("verify certificate token 42 please");
        assert_eq!(
            reply.action,
            Some(Route::Verify {
                token: Some(TokenId(42))
            })
        );
        assert!(reply.message.contains("42"));
    }

    #[test]
    fn verify_without_token_still_routes() {
        let reply = interpret("can you verify my certificate?");
        assert_eq!(reply.action, Some(Route::Verify { token: None }));
    }

    #[test]
    fn token_word_requires_whitespace_before_digits() {
        assert_eq!(extract_token_id("verify token42"), None);
        assert_eq!(extract_token_id("verify token 42"), Some(TokenId(42)));
        assert_eq!(extract_token_id("token  7"), Some(TokenId(7)));
        assert_eq!(extract_token_id("no number here"), None);
    }

    #[test]
    fn earlier_rules_win_over_later_ones() {
        // Matches both the verify and issue rules; verify comes first.
        let reply = interpret("verify my certificate and then issue a new one");
        assert!(matches!(reply.action, Some(Route::Verify { .. })));
    }

    #[test]
    fn issue_and_bulk_are_distinct() {
        assert_eq!(interpret("issue a certificate").action, Some(Route::Issue));
        assert_eq!(interpret("bulk issue from csv").action, Some(Route::BulkIssue));
    }

    #[test]
    fn navigation_help_and_greeting() {
        assert_eq!(interpret("go home").action, Some(Route::Home));
        assert_eq!(interpret("open the dashboard").action, Some(Route::Home));
        assert_eq!(interpret("admin area").action, Some(Route::Admin));
        assert_eq!(interpret("help me out").action, None);
        assert_eq!(interpret("hello there").action, None);
    }

    #[test]
    fn unknown_input_gets_the_fallback_reply() {
        let reply = interpret("what is the weather like");
        assert_eq!(reply.action, None);
        assert!(reply.message.contains("not sure I understood"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let reply = interpret("SHOW MY CERTIFICATES");
        assert_eq!(reply.action, Some(Route::MyCertificates));
    }
}
