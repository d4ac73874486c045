/// Model options and the survey file format.
///
/// Everything here deserializes with `serde`, so a survey can be loaded from
/// JSON together with its options.
pub mod config;
/// Reverse index from answer names to the questions that read them.
pub mod dependency;
/// Change notifications delivered to subscribed listeners.
pub mod events;
/// The reactive model.
///
/// Owns the questions, the environment of answers and the dependency maps,
/// and propagates each answer update to exactly the questions that depend on
/// it.
pub mod model;
/// Question definitions and their loaded form.
pub mod question;
/// Title templates with `{{ name }}` placeholders.
pub mod template;
