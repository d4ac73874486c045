use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;
use showif::{
    ModelEvent, ModelOptions, PlaceholderFallback, QuestionDef, ReactiveModel, RuntimeError,
    SurveyDefinition, SurveyError, SyntaxError, Value,
};

const SURVEY: &str = include_str!("fixtures/survey.json");

fn model(definitions: Vec<QuestionDef>) -> ReactiveModel {
    ReactiveModel::new(definitions).unwrap_or_else(|e| panic!("Survey failed to load: {e}"))
}

fn model_with_fallback(title: &str, fallback: PlaceholderFallback) -> ReactiveModel {
    let options = ModelOptions { placeholder_fallback: fallback };
    ReactiveModel::with_options([QuestionDef::new("Q", title)], options).unwrap()
}

fn title_of(model: &ReactiveModel, name: &str) -> String {
    model.question(name)
         .unwrap_or_else(|| panic!("No question named '{name}'"))
         .rendered_title()
         .to_string()
}

fn is_visible(model: &ReactiveModel, name: &str) -> bool {
    model.question(name)
         .unwrap_or_else(|| panic!("No question named '{name}'"))
         .is_visible()
}

fn colors_survey() -> ReactiveModel {
    model(vec![QuestionDef::new("A", "Do you like colors?"),
               QuestionDef::new("B", "Which one?").with_condition("A.answer = 'Yes'"),
               QuestionDef::new("C", "Anything else?")])
}

#[test]
fn update_reaches_only_dependents() {
    let mut survey = colors_survey();

    let report = survey.update_response("A.answer", "Yes");

    assert_eq!(report.changed_visibility, vec![("B".to_string(), true)]);
    assert!(report.changed_titles.is_empty());
    assert!(report.failures.is_empty());

    let report = survey.update_response("C.answer", "Yes");
    assert!(report.is_empty());
}

#[test]
fn initial_state() {
    let survey = colors_survey();

    assert!(is_visible(&survey, "A"));
    assert!(!is_visible(&survey, "B"));
    assert!(is_visible(&survey, "C"));

    let visible: Vec<&str> = survey.visible_questions().map(|q| q.name()).collect();
    assert_eq!(visible, vec!["A", "C"]);

    let b = survey.question("B").unwrap();
    assert_eq!(b.index(), 1);
    assert_eq!(b.title(), "Which one?");
    assert_eq!(b.condition().map(|c| c.source()), Some("A.answer = 'Yes'"));
}

#[test]
fn repeated_update_is_idempotent() {
    let mut survey = model(vec![QuestionDef::new("color", "Pick one"),
                                QuestionDef::new("why", "Why {{color}}?").with_condition("color = 'blue'")]);

    let first = survey.update_response("color", "blue");
    assert_eq!(first.changed_titles, vec![("why".to_string(), "Why blue?".to_string())]);
    assert_eq!(first.changed_visibility, vec![("why".to_string(), true)]);

    let second = survey.update_response("color", "blue");
    assert!(second.is_empty());
    assert_eq!(title_of(&survey, "why"), "Why blue?");
    assert!(is_visible(&survey, "why"));
}

#[test]
fn answers_can_hide_again() {
    let mut survey = colors_survey();

    survey.update_response("A.answer", "Yes");
    let report = survey.update_response("A.answer", "No");

    assert_eq!(report.changed_visibility, vec![("B".to_string(), false)]);
    assert!(!is_visible(&survey, "B"));
}

#[test]
fn title_substitution() {
    let mut survey = model(vec![QuestionDef::new("why", "Why do you like {{favorite_color}}?")]);

    survey.update_response("favorite_color", "blue");
    assert_eq!(title_of(&survey, "why"), "Why do you like blue?");

    survey.update_response("favorite_color", "green");
    assert_eq!(title_of(&survey, "why"), "Why do you like green?");
}

#[test]
fn titles_render_values_as_text() {
    let mut survey = model(vec![QuestionDef::new("Q", "{{ n }} / {{list}} / {{ok}}")]);

    survey.update_response("n", 2.5);
    survey.update_response("list", Value::array(["a", "b"]));
    survey.update_response("ok", true);

    assert_eq!(title_of(&survey, "Q"), "2.5 / a, b / true");
}

#[test]
fn nested_placeholder_follows_root_updates() {
    let mut survey = model(vec![QuestionDef::new("Q", "Hello {{ person.name }}!")]);

    let report = survey.update_response("person.name", "Ada");
    assert_eq!(report.changed_titles, vec![("Q".to_string(), "Hello Ada!".to_string())]);

    let report = survey.update_response("person.age", 36);
    assert!(report.is_empty());
}

#[test]
fn malformed_placeholders_stay_literal() {
    let mut survey = model(vec![QuestionDef::new("Q", "{ {x} } {{ x }} {{ 1x }} {{x")]);

    survey.update_response("x", "X");
    assert_eq!(title_of(&survey, "Q"), "{ {x} } X {{ 1x }} {{x");
}

#[test]
fn extra_braces_around_a_placeholder_stay_literal() {
    let mut survey = model(vec![QuestionDef::new("Q", "{{{x}}} and {{ x }}}")]);

    survey.update_response("x", "X");
    assert_eq!(title_of(&survey, "Q"), "{X} and X}");
}

#[test]
fn placeholder_fallback_empty() {
    let survey = model_with_fallback("Plans for {{season}}?", PlaceholderFallback::Empty);
    assert_eq!(title_of(&survey, "Q"), "Plans for ?");
}

#[test]
fn placeholder_fallback_keep() {
    let survey = model_with_fallback("Plans for {{ season }}?", PlaceholderFallback::Keep);
    assert_eq!(title_of(&survey, "Q"), "Plans for {{ season }}?");
}

#[test]
fn placeholder_fallback_text() {
    let mut survey = model_with_fallback("Plans for {{season.name}}?",
                                         PlaceholderFallback::Text("this season".to_string()));
    assert_eq!(title_of(&survey, "Q"), "Plans for this season?");

    survey.update_response("season.year", 2026);
    assert_eq!(title_of(&survey, "Q"), "Plans for this season?");

    survey.update_response("season.name", "spring");
    assert_eq!(title_of(&survey, "Q"), "Plans for spring?");
}

#[test]
fn runtime_failures_are_isolated() {
    let mut survey = model(vec![QuestionDef::new("A", "Score?"),
                                QuestionDef::new("Broken", "").with_condition("A.answer > 3"),
                                QuestionDef::new("Flagged", "").with_condition("A.answer = true")]);

    let report = survey.update_response("A.answer", true);

    assert_eq!(report.changed_visibility, vec![("Flagged".to_string(), true)]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].question, "Broken");
    assert!(matches!(report.failures[0].error, RuntimeError::TypeError { .. }));
    assert!(!is_visible(&survey, "Broken"));
}

#[test]
fn unknown_root_in_condition_is_a_failure() {
    let mut survey =
        model(vec![QuestionDef::new("B", "").with_condition("X.answer = 'Yes' or A.answer = 'Yes'")]);

    let report = survey.update_response("A.answer", "Yes");

    assert!(report.changed_visibility.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error,
               RuntimeError::UndefinedVariable { name:     "X".to_string(),
                                                 position: 0, });

    survey.update_response("X.answer", "No");
    assert!(is_visible(&survey, "B"));
}

#[test]
fn missing_nested_answer_keeps_question_hidden() {
    let mut survey = model(vec![QuestionDef::new("B", "").with_condition("A.answer = 'Yes'")]);

    let report = survey.update_response("A.comment", "hello");

    assert!(report.is_empty());
    assert!(!is_visible(&survey, "B"));
}

#[test]
fn constant_conditions_are_decided_at_load() {
    let mut survey = model(vec![QuestionDef::new("always", "").with_condition("1 < 2"),
                                QuestionDef::new("never", "").with_condition("1 > 2"),
                                QuestionDef::new("broken", "").with_condition("1 / 0"),
                                QuestionDef::new("plain", "Hi")]);

    assert!(is_visible(&survey, "always"));
    assert!(!is_visible(&survey, "never"));
    assert!(!is_visible(&survey, "broken"));

    assert!(survey.update_response("unrelated", 1).is_empty());
    assert!(is_visible(&survey, "always"));
}

#[test]
fn evaluate_all_refreshes_everything() {
    let mut survey = model(vec![QuestionDef::new("always", "").with_condition("1 < 2"),
                                QuestionDef::new("adult", "Age {{age}}").with_condition("age >= 18")]);

    let report = survey.evaluate_all();
    assert!(report.changed_visibility.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].question, "adult");

    survey.update_response("age", 20);
    assert!(is_visible(&survey, "adult"));
    assert_eq!(title_of(&survey, "adult"), "Age 20");
    assert!(survey.evaluate_all().is_empty());
}

#[test]
fn listeners_receive_changes_until_unsubscribed() {
    let mut survey = model(vec![QuestionDef::new("why", "Why {{color}}?").with_condition("color != ''")]);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let id = survey.subscribe(move |event: &ModelEvent| sink.borrow_mut().push(event.clone()));

    survey.update_response("color", "red");

    let questions: Vec<String> = events.borrow().iter().map(|e| e.question().to_string()).collect();
    assert_eq!(questions, vec!["why", "why"]);
    assert_eq!(*events.borrow(),
               vec![ModelEvent::TitleChanged { question: "why".to_string(),
                                               title:    "Why red?".to_string(), },
                    ModelEvent::VisibilityChanged { question: "why".to_string(),
                                                    visible:  true, }]);

    assert!(survey.unsubscribe(id));
    assert!(!survey.unsubscribe(id));

    survey.update_response("color", "");
    assert_eq!(events.borrow().len(), 2);
    assert!(!is_visible(&survey, "why"));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = ReactiveModel::new([QuestionDef::new("A", "One"), QuestionDef::new("A", "Two")])
              .unwrap_err();
    assert_eq!(err, SurveyError::DuplicateQuestion { name: "A".to_string() });
}

#[test]
fn invalid_conditions_fail_the_load() {
    let err = ReactiveModel::new([QuestionDef::new("B", "").with_condition("A.answer = 'Yes")])
              .unwrap_err();
    assert_eq!(err,
               SurveyError::InvalidCondition { question: "B".to_string(),
                                               source:   SyntaxError::UnterminatedString { position: 11 }, });
}

#[test]
fn blank_conditions_mean_always_visible() {
    let survey = model(vec![QuestionDef::new("Q", "").with_condition("   ")]);
    assert!(is_visible(&survey, "Q"));
    assert!(survey.question("Q").unwrap().condition().is_none());
}

#[test]
fn dependency_maps_list_each_question_once() {
    let survey = model(vec![QuestionDef::new("Q", "{{A.x}} {{A.y}} {{B}}")
                                .with_condition("A.x = 1 and A.y = 2 or B"),
                            QuestionDef::new("R", "{{A}}")]);

    let deps = survey.dependencies();
    assert_eq!(deps.title_dependents("A"), [0, 1]);
    assert_eq!(deps.title_dependents("B.anything"), [0]);
    assert_eq!(deps.visibility_dependents("A.x"), [0]);
    assert!(deps.visibility_dependents("R").is_empty());
}

#[test]
fn survey_file_round() {
    let definition: SurveyDefinition = serde_json::from_str(SURVEY).unwrap();
    assert_eq!(definition.options.placeholder_fallback,
               PlaceholderFallback::Text("this season".to_string()));

    let mut survey = ReactiveModel::from_definition(definition).unwrap();
    assert_eq!(survey.options().placeholder_fallback,
               PlaceholderFallback::Text("this season".to_string()));
    assert_eq!(title_of(&survey, "dark_reason"),
               "What do you like about dark mode in this season?");
    assert!(!is_visible(&survey, "why_color"));

    let report = survey.update_response("favorite_color", "blue");
    assert_eq!(report.changed_titles,
               vec![("why_color".to_string(), "Why do you like blue?".to_string())]);
    assert_eq!(report.changed_visibility, vec![("why_color".to_string(), true)]);

    let report = survey.update_response("Participant_Age.answer", 25);
    assert_eq!(report.changed_titles,
               vec![("student".to_string(), "Are you a student at 25?".to_string())]);
    assert_eq!(report.changed_visibility, vec![("student".to_string(), true)]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].question, "dark_reason");

    let report = survey.update_response("themes", Value::array(["dark", "contrast"]));
    assert_eq!(report.changed_visibility, vec![("dark_reason".to_string(), true)]);

    let visible: Vec<&str> = survey.visible_questions().map(|q| q.name()).collect();
    assert_eq!(visible,
               vec!["favorite_color",
                    "why_color",
                    "Participant_Age",
                    "student",
                    "themes",
                    "dark_reason"]);
}
