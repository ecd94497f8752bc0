//! E2E tests: a full session against HTTP stand-ins for both services.

mod helpers;

use helpers::{AREAS, LABELS, TestHarness, classified_input};
use hs_agent::{RouterEvent, RouterState, ScriptedConsole};
use hs_protocol::DirectiveKind;

#[tokio::test]
async fn system_prompt_carries_the_home_snapshot() {
    let h = TestHarness::start().await;
    h.script_completions(&["ANSWER", "Hello there."]).await;

    let mut router = h.router().await;
    let mut console = ScriptedConsole::new(["hi", "exit"]);
    router.run(&mut console).await;

    let requests = h.completion_requests().await;
    assert_eq!(requests.len(), 2);
    let system = requests[0][0]["content"].as_str().unwrap();
    assert_eq!(requests[0][0]["role"], "system");
    assert!(system.contains(AREAS));
    assert!(system.contains(LABELS));
    assert!(system.contains("Al"));
}

#[tokio::test]
async fn query_result_is_fed_back_without_prompting() {
    let h = TestHarness::start().await;
    let template = "{{ states('sensor.kitchen_temperature') }}";
    h.answer_query(template, 200, "21.5").await;
    h.script_completions(&[
        "QUERY",
        template,
        "ANSWER",
        "It is 21.5 degrees in the kitchen.",
    ])
    .await;

    let mut router = h.router().await;
    let mut console = ScriptedConsole::new(["how warm is the kitchen?", "bye"]);
    router.run(&mut console).await;

    assert_eq!(*router.state(), RouterState::Terminated);
    assert_eq!(router.cycles(), 2);
    // First input and the exit word; the query result needed no prompt.
    assert_eq!(console.prompts(), 2);

    let requests = h.completion_requests().await;
    assert_eq!(requests.len(), 4);
    assert_eq!(classified_input(&requests[0]), "how warm is the kitchen?");
    assert_eq!(classified_input(&requests[2]), "21.5");

    assert!(h.template_queries().await.contains(&template.to_string()));

    let events = console.events();
    assert!(events.contains(&RouterEvent::QueryResult("21.5".into())));
    assert!(events.contains(&RouterEvent::Reply {
        kind: DirectiveKind::Answer,
        text: "It is 21.5 degrees in the kitchen.".into(),
    }));
    assert_eq!(events.last(), Some(&RouterEvent::Exiting));
}

#[tokio::test]
async fn followup_returns_control_to_the_operator() {
    let h = TestHarness::start().await;
    h.script_completions(&["FOLLOWUP", "Which room?", "ANSWER", "Done."])
        .await;

    let mut router = h.router().await;
    let mut console = ScriptedConsole::new(["turn on the light", "the bedroom", "end"]);
    router.run(&mut console).await;

    assert_eq!(router.cycles(), 2);
    assert_eq!(console.prompts(), 3);
    let requests = h.completion_requests().await;
    assert_eq!(classified_input(&requests[2]), "the bedroom");
    assert!(console.events().contains(&RouterEvent::Reply {
        kind: DirectiveKind::Followup,
        text: "Which room?".into(),
    }));
}

#[tokio::test]
async fn exit_word_first_makes_no_calls() {
    let h = TestHarness::start().await;

    let mut router = h.router().await;
    let mut console = ScriptedConsole::new(["  Exit  "]);
    router.run(&mut console).await;

    assert_eq!(*router.state(), RouterState::Terminated);
    assert_eq!(router.cycles(), 0);
    assert!(h.completion_requests().await.is_empty());
    assert_eq!(console.events(), &[RouterEvent::Exiting]);
}

#[tokio::test]
async fn transcript_keeps_every_exchange() {
    let h = TestHarness::start().await;
    h.script_completions(&["ANSWER", "First.", "ANSWER", "Second."])
        .await;

    let mut router = h.router().await;
    let mut console = ScriptedConsole::new(["one", "two"]);
    router.run(&mut console).await;

    // System + (user, reminder, classify reply, generation prompt, reply) per cycle.
    assert_eq!(router.transcript().len(), 11);

    // The second classification carries the first cycle's reminder too.
    let requests = h.completion_requests().await;
    let reminders = requests[2]
        .iter()
        .filter(|m| m["content"] == hs_completion::CLASSIFY_REMINDER)
        .count();
    assert_eq!(reminders, 2);
    assert_eq!(classified_input(&requests[2]), "two");
}
