//! Free-form follow-up questions. Every question is a fresh single-turn request;
//! nothing carries over between turns.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::warn;

use crate::llm::{CompletionService, ask_question};

pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Run the question loop until `exit` or end of input. Returns how many questions
/// were sent to the service.
pub async fn interactive_session(
    service: &impl CompletionService,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<usize> {
    writeln!(out, "Interactive session started. Type 'exit' to quit.")?;

    let mut asked = 0;
    loop {
        write!(out, "You: ")?;
        out.flush().ok();

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || is_exit(&line) {
            break;
        }

        let question = line.trim_end_matches(['\r', '\n']);
        asked += 1;
        match ask_question(service, question).await {
            Ok(answer) => writeln!(out, "Advisor: {answer}")?,
            Err(e) => {
                warn!(error = ?e, "question failed");
                writeln!(out, "{e}")?;
            }
        }
    }
    Ok(asked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;
    use crate::llm::tests::FakeService;
    use crate::llm::{ChatMessage, Completion, QA_PERSONA};
    use reqwest::StatusCode;
    use std::io::Cursor;

    #[test]
    fn test_is_exit() {
        assert!(is_exit("exit"));
        assert!(is_exit("  Exit \n"));
        assert!(is_exit("EXIT"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit(""));
    }

    #[tokio::test]
    async fn test_exit_sends_nothing() {
        let svc = FakeService::default();
        let mut input = Cursor::new(b"  Exit  \nnever asked\n".to_vec());
        let mut out = Vec::new();

        let asked = interactive_session(&svc, &mut input, &mut out).await.unwrap();
        assert_eq!(asked, 0);
        assert!(svc.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_each_question_is_independent() {
        let svc = FakeService::with_replies(vec![
            Ok(Completion::from_text("Build an emergency fund.")),
            Ok(Completion::from_text("Automate transfers.")),
        ]);
        let mut input = Cursor::new(b"How much should I save?\nHow do I start?\nexit\n".to_vec());
        let mut out = Vec::new();

        let asked = interactive_session(&svc, &mut input, &mut out).await.unwrap();
        assert_eq!(asked, 2);

        let calls = svc.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1],
            vec![ChatMessage::system(QA_PERSONA), ChatMessage::user("How do I start?")]
        );

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Advisor: Build an emergency fund.\n"));
        assert!(out.contains("Advisor: Automate transfers.\n"));
    }

    #[tokio::test]
    async fn test_failed_turn_is_reported_and_loop_continues() {
        let svc = FakeService::with_replies(vec![
            Err(AdvisorError::from_status(StatusCode::UNAUTHORIZED, "")),
            Ok(Completion::from_text("Second try worked.")),
        ]);
        let mut input = Cursor::new(b"first\nsecond\n".to_vec());
        let mut out = Vec::new();

        let asked = interactive_session(&svc, &mut input, &mut out).await.unwrap();
        assert_eq!(asked, 2);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Authentication error: Please check your OpenAI API key. (Unauthorized)\n"));
        assert!(out.contains("Advisor: Second try worked.\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let svc = FakeService::default();
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();
        assert_eq!(interactive_session(&svc, &mut input, &mut out).await.unwrap(), 0);
    }
}
