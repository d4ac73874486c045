//! # showif
//!
//! showif evaluates the small expression language used by survey questions:
//! visibility conditions such as `A.answer = 'Yes' and age is between 18 and
//! 30`, and `{{ placeholder }}` substitution in question titles.
//!
//! Conditions are compiled once into an AST and evaluated against an
//! [`Environment`] of answers. A [`ReactiveModel`] keeps a survey's titles and
//! visibility in step with the answers, re-evaluating only the questions that
//! read the answer that changed.
//!
//! ```
//! use showif::{QuestionDef, ReactiveModel};
//!
//! let mut model = ReactiveModel::new([
//!     QuestionDef::new("favorite_color", "What is your favorite color?"),
//!     QuestionDef::new("why", "Why do you like {{favorite_color}}?")
//!         .with_condition("favorite_color != ''"),
//! ]).unwrap();
//!
//! model.update_response("favorite_color", "blue");
//!
//! let why = model.question("why").unwrap();
//! assert!(why.is_visible());
//! assert_eq!(why.rendered_title(), "Why do you like blue?");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator enums that represent
/// a condition or binding as a tree. The AST is built by the parser, walked by
/// the evaluator and the dependency tracker, and printed back to source by its
/// `Display` implementation.
pub mod ast;
/// Compile-once entry points.
///
/// Compiling, evaluating, and the cache that lets a survey share compiled
/// conditions between questions.
pub mod engine;
/// Provides unified error types for parsing, evaluation and survey loading.
///
/// Every error carries the byte offset of the offending source where one
/// exists.
pub mod error;
/// Lexing, parsing, values, the environment and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The reactive survey model.
///
/// Question definitions, title templates, dependency tracking and change
/// propagation.
pub mod survey;

pub use crate::{
    engine::{CompiledExpression, ExpressionCache, compile, compile_binding, evaluate, evaluate_str},
    error::{Error, RuntimeError, SurveyError, SyntaxError},
    interpreter::{environment::Environment, value::Value},
    survey::{
        config::{ModelOptions, PlaceholderFallback, SurveyDefinition},
        events::{ModelEvent, SubscriptionId},
        model::{EvaluationFailure, ReactiveModel, UpdateReport},
        question::{Question, QuestionDef},
    },
};
