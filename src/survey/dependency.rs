use std::collections::HashMap;

use crate::survey::question::Question;

/// Reverse index from root answer names to dependent questions.
///
/// Two maps are kept: questions whose title reads a name, and questions whose
/// visibility condition reads it. Each lists question indices in survey order,
/// each index at most once per name. The maps are built once and not changed
/// afterwards.
///
/// Lookups take any answer name and use its root segment, so `A.answer` and
/// `A` find the same dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTracker {
    title_dependencies:      HashMap<String, Vec<usize>>,
    visibility_dependencies: HashMap<String, Vec<usize>>,
}

impl DependencyTracker {
    /// Builds both maps from loaded questions.
    ///
    /// # Example
    /// ```
    /// use showif::survey::{model::ReactiveModel, question::QuestionDef};
    ///
    /// let model = ReactiveModel::new([
    ///     QuestionDef::new("A", "Do you like colors?"),
    ///     QuestionDef::new("B", "Which one, {{A.name}}?").with_condition("A.answer = 'Yes'"),
    /// ]).unwrap();
    ///
    /// let deps = model.dependencies();
    /// assert_eq!(deps.visibility_dependents("A.answer"), [1]);
    /// assert_eq!(deps.title_dependents("A"), [1]);
    /// assert!(deps.visibility_dependents("B").is_empty());
    /// ```
    #[must_use]
    pub fn build(questions: &[Question]) -> Self {
        let mut tracker = Self::default();

        for question in questions {
            for root in question.template.roots() {
                register(&mut tracker.title_dependencies, root, question.index);
            }
            if let Some(condition) = &question.condition {
                for root in condition.root_identifiers() {
                    register(&mut tracker.visibility_dependencies, root, question.index);
                }
            }
        }

        tracker
    }

    /// Questions whose title reads the root of `name`.
    #[must_use]
    pub fn title_dependents(&self, name: &str) -> &[usize] {
        lookup(&self.title_dependencies, name)
    }

    /// Questions whose visibility condition reads the root of `name`.
    #[must_use]
    pub fn visibility_dependents(&self, name: &str) -> &[usize] {
        lookup(&self.visibility_dependencies, name)
    }
}

/// The first segment of a dotted answer name.
#[must_use]
pub fn root_name(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

fn register(map: &mut HashMap<String, Vec<usize>>, root: &str, index: usize) {
    let dependents = map.entry(root.to_string()).or_default();
    if dependents.last() != Some(&index) {
        dependents.push(index);
    }
}

fn lookup<'a>(map: &'a HashMap<String, Vec<usize>>, name: &str) -> &'a [usize] {
    map.get(root_name(name)).map_or(&[], Vec::as_slice)
}
