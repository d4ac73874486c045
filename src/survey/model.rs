use std::{collections::HashMap, fmt};

use tracing::{debug, warn};

use crate::{
    engine::ExpressionCache,
    error::{RuntimeError, SurveyError},
    interpreter::{environment::Environment, value::Value},
    survey::{
        config::{ModelOptions, SurveyDefinition},
        dependency::{DependencyTracker, root_name},
        events::{Listener, ModelEvent, SubscriptionId},
        question::{Question, QuestionDef},
        template::Template,
    },
};

/// A visibility condition that failed to evaluate during propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationFailure {
    /// The question whose condition failed.
    pub question: String,
    /// Why it failed.
    pub error:    RuntimeError,
}

impl fmt::Display for EvaluationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.question, self.error)
    }
}

/// What one update changed.
///
/// Only real changes are listed: a title that renders to the same text or a
/// condition that keeps its outcome does not appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// `(question, new rendered title)` pairs.
    pub changed_titles:     Vec<(String, String)>,
    /// `(question, new visibility)` pairs.
    pub changed_visibility: Vec<(String, bool)>,
    /// Conditions that raised a runtime error. Those questions kept their
    /// previous visibility.
    pub failures:           Vec<EvaluationFailure>,
}

impl UpdateReport {
    /// Returns `true` when nothing changed and nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_titles.is_empty()
        && self.changed_visibility.is_empty()
        && self.failures.is_empty()
    }
}

/// A survey whose titles and visibility follow the answers.
///
/// The model owns the questions, the [`Environment`] of answers and the
/// [`DependencyTracker`]. Conditions are compiled once, at load time; an
/// answer update only re-evaluates the questions that read that answer's root
/// name.
///
/// # Example
/// ```
/// use showif::survey::{model::ReactiveModel, question::QuestionDef};
///
/// let mut model = ReactiveModel::new([
///     QuestionDef::new("A", "Do you like colors?"),
///     QuestionDef::new("B", "Which one?").with_condition("A.answer = 'Yes'"),
/// ]).unwrap();
///
/// let report = model.update_response("A.answer", "Yes");
///
/// assert_eq!(report.changed_visibility, [("B".to_string(), true)]);
/// assert!(model.question("B").unwrap().is_visible());
/// ```
pub struct ReactiveModel {
    questions:         Vec<Question>,
    by_name:           HashMap<String, usize>,
    environment:       Environment,
    dependencies:      DependencyTracker,
    options:           ModelOptions,
    listeners:         Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ReactiveModel {
    /// Loads questions with default options.
    ///
    /// # Errors
    /// Same as [`ReactiveModel::with_options`].
    pub fn new<I>(definitions: I) -> Result<Self, SurveyError>
        where I: IntoIterator<Item = QuestionDef>
    {
        Self::with_options(definitions, ModelOptions::default())
    }

    /// Loads a parsed survey file.
    ///
    /// # Errors
    /// Same as [`ReactiveModel::with_options`].
    pub fn from_definition(definition: SurveyDefinition) -> Result<Self, SurveyError> {
        Self::with_options(definition.questions, definition.options)
    }

    /// Loads questions.
    ///
    /// Every title is parsed and every condition compiled here, so a bad
    /// condition fails the whole load. Conditions that read no answers are
    /// evaluated once here, since no update would ever reach them. The other
    /// conditional questions start hidden, titles start rendered against the
    /// empty environment.
    ///
    /// # Errors
    /// - [`SurveyError::DuplicateQuestion`] if two questions share a name.
    /// - [`SurveyError::InvalidCondition`] if a condition does not compile.
    pub fn with_options<I>(definitions: I, options: ModelOptions) -> Result<Self, SurveyError>
        where I: IntoIterator<Item = QuestionDef>
    {
        let environment = Environment::new();
        let mut cache = ExpressionCache::new();
        let mut questions = Vec::new();
        let mut by_name = HashMap::new();

        for (index, def) in definitions.into_iter().enumerate() {
            if by_name.insert(def.name.clone(), index).is_some() {
                return Err(SurveyError::DuplicateQuestion { name: def.name });
            }

            let condition = match def.condition() {
                Some(source) => {
                    let compiled = cache.compile(source).map_err(|source| {
                                       SurveyError::InvalidCondition { question: def.name.clone(),
                                                                       source }
                                   })?;
                    Some(compiled)
                },
                None => None,
            };

            let template = Template::parse(&def.title);
            let rendered_title = template.render(&environment, &options.placeholder_fallback);

            questions.push(Question { is_visible: condition.is_none(),
                                      name: def.name,
                                      index,
                                      template,
                                      condition,
                                      rendered_title });
        }

        let dependencies = DependencyTracker::build(&questions);
        let constant: Vec<usize> =
            questions.iter()
                     .filter(|q| q.condition.as_ref().is_some_and(|c| c.root_identifiers().is_empty()))
                     .map(|q| q.index)
                     .collect();

        let mut model = Self { questions,
                               by_name,
                               environment,
                               dependencies,
                               options,
                               listeners: Vec::new(),
                               next_subscription: 0 };

        let mut report = UpdateReport::default();
        for index in constant {
            model.refresh_visibility(index, &mut report);
        }

        debug!(questions = model.questions.len(),
               conditions = cache.len(),
               shown_at_load = report.changed_visibility.len(),
               "survey model loaded");

        Ok(model)
    }

    /// Records an answer and propagates it.
    ///
    /// The value is written under `name`, which may be a dotted path such as
    /// `A.answer`. Then every question whose title or condition reads the root
    /// of `name` is refreshed; no other question is touched. Each actual change
    /// is reported and sent to the listeners.
    ///
    /// A condition that fails at runtime is logged and listed in
    /// [`UpdateReport::failures`]; its question keeps its visibility and the
    /// remaining dependents are still refreshed.
    #[tracing::instrument(skip(self, value))]
    pub fn update_response(&mut self, name: &str, value: impl Into<Value>) -> UpdateReport {
        self.environment.set(name, value);

        let root = root_name(name);
        let mut report = UpdateReport::default();

        for index in self.dependencies.title_dependents(root).to_vec() {
            self.refresh_title(index, &mut report);
        }
        for index in self.dependencies.visibility_dependents(root).to_vec() {
            self.refresh_visibility(index, &mut report);
        }

        report
    }

    /// Re-renders every title and re-evaluates every condition.
    ///
    /// Useful after loading, or after answers were preloaded, to bring every
    /// question in line with the environment at once.
    #[tracing::instrument(skip(self))]
    pub fn evaluate_all(&mut self) -> UpdateReport {
        let mut report = UpdateReport::default();

        for index in 0..self.questions.len() {
            self.refresh_title(index, &mut report);
        }
        for index in 0..self.questions.len() {
            self.refresh_visibility(index, &mut report);
        }

        report
    }

    /// Looks up a question by name.
    #[must_use]
    pub fn question(&self, name: &str) -> Option<&Question> {
        self.by_name.get(name).and_then(|index| self.questions.get(*index))
    }

    /// All questions in survey order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The currently visible questions in survey order.
    pub fn visible_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|question| question.is_visible)
    }

    /// The current answers.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The dependency maps built at load time.
    #[must_use]
    pub const fn dependencies(&self) -> &DependencyTracker {
        &self.dependencies
    }

    /// The options the model was loaded with.
    #[must_use]
    pub const fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Registers a listener for title and visibility changes.
    ///
    /// Listeners are called in subscription order, after the change has been
    /// applied to the model.
    ///
    /// # Example
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    ///
    /// use showif::survey::{events::ModelEvent, model::ReactiveModel, question::QuestionDef};
    ///
    /// let mut model = ReactiveModel::new([
    ///     QuestionDef::new("B", "Which one?").with_condition("A.answer = 'Yes'"),
    /// ]).unwrap();
    ///
    /// let seen = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&seen);
    /// let id = model.subscribe(move |event: &ModelEvent| sink.borrow_mut().push(event.clone()));
    ///
    /// model.update_response("A.answer", "Yes");
    /// assert!(model.unsubscribe(id));
    /// model.update_response("A.answer", "No");
    ///
    /// assert_eq!(*seen.borrow(),
    ///            [ModelEvent::VisibilityChanged { question: "B".into(), visible: true }]);
    /// ```
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
        where F: FnMut(&ModelEvent) + 'static
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(subscribed, _)| *subscribed != id);
        self.listeners.len() != before
    }

    fn refresh_title(&mut self, index: usize, report: &mut UpdateReport) {
        let Some(question) = self.questions.get_mut(index) else {
            return;
        };

        let title = question.template.render(&self.environment, &self.options.placeholder_fallback);
        if title == question.rendered_title {
            return;
        }

        debug!(question = %question.name, %title, "title changed");
        question.rendered_title.clone_from(&title);
        report.changed_titles.push((question.name.clone(), title.clone()));

        let event = ModelEvent::TitleChanged { question: question.name.clone(),
                                               title };
        self.emit(&event);
    }

    fn refresh_visibility(&mut self, index: usize, report: &mut UpdateReport) {
        let Some(condition) = self.questions.get(index).and_then(|q| q.condition.clone()) else {
            return;
        };

        let outcome = self.environment.eval(condition.ast());
        let Some(question) = self.questions.get_mut(index) else {
            return;
        };

        let visible = match outcome {
            Ok(value) => value.is_truthy(),
            Err(error) => {
                warn!(question = %question.name,
                      condition = condition.source(),
                      %error,
                      "visibility condition failed, keeping previous state");
                report.failures.push(EvaluationFailure { question: question.name.clone(),
                                                         error });
                return;
            },
        };

        if visible == question.is_visible {
            return;
        }

        debug!(question = %question.name, visible, "visibility changed");
        question.is_visible = visible;
        report.changed_visibility.push((question.name.clone(), visible));

        let event = ModelEvent::VisibilityChanged { question: question.name.clone(),
                                                    visible };
        self.emit(&event);
    }

    fn emit(&mut self, event: &ModelEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for ReactiveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveModel")
         .field("questions", &self.questions)
         .field("environment", &self.environment)
         .field("dependencies", &self.dependencies)
         .field("options", &self.options)
         .field("listeners", &self.listeners.len())
         .finish_non_exhaustive()
    }
}
