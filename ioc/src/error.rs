use std::error::Error as StdError;

use thiserror::Error;

use crate::core::BoxError;

/// The main error type for the `fibre_injector` library.
///
/// Wrapping variants keep their cause as the error `source`, so a failure deep
/// in a dependency chain stays traceable from the name that started the
/// resolution.
#[derive(Debug, Error)]
pub enum InjectError {
  #[error("Can't instantiate {0}: no definition registered")]
  UnknownComponent(String),

  #[error("Cyclic dependency from and to {0} detected")]
  CyclicDependency(String),

  #[error("Failed to instantiate: {name}")]
  InstantiationFailed {
    name: String,
    #[source]
    source: BoxError,
  },

  #[error("Failed injecting: {deps:?}: registered dependencies are: {registered:?}")]
  InjectionFailed {
    deps: Vec<String>,
    registered: Vec<String>,
    #[source]
    source: Box<InjectError>,
  },

  #[error("Can't resolve {name}")]
  ResolutionFailed {
    name: String,
    #[source]
    source: Box<InjectError>,
  },

  #[error("{0} is already registered")]
  AlreadyRegistered(String),

  #[error("Component '{name}' is not of type {expected}")]
  TypeMismatch { name: String, expected: &'static str },

  #[error("Unknown instantiation strategy: {0}")]
  UnknownStrategy(String),
}

impl InjectError {
  /// Walks the `source` chain and returns the innermost `InjectError`.
  ///
  /// A build function's own error ends the walk at the enclosing
  /// `InstantiationFailed` unless that error is itself an `InjectError`.
  pub fn root_cause(&self) -> &InjectError {
    let mut current = self;
    while let Some(next) = current.nested() {
      current = next;
    }
    current
  }

  /// Returns `true` if a cyclic dependency is anywhere in the chain.
  pub fn is_cyclic(&self) -> bool {
    matches!(self.root_cause(), InjectError::CyclicDependency(_))
  }

  /// Renders the error together with every cause, one per line.
  pub fn report(&self) -> String {
    let mut out = self.to_string();
    let mut source = self.source();
    while let Some(cause) = source {
      out.push_str("\n  caused by: ");
      out.push_str(&cause.to_string());
      source = cause.source();
    }
    out
  }

  fn nested(&self) -> Option<&InjectError> {
    match self {
      InjectError::InjectionFailed { source, .. } | InjectError::ResolutionFailed { source, .. } => {
        Some(source.as_ref())
      }
      InjectError::InstantiationFailed { source, .. } => source.downcast_ref::<InjectError>(),
      _ => None,
    }
  }
}

/// Errors raised while reading build-function arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
  #[error("Missing argument at position {index} (got {len})")]
  Missing { index: usize, len: usize },

  #[error("Argument at position {index} is not of type {expected}")]
  TypeMismatch { index: usize, expected: &'static str },
}

/// A specialized `Result` type for `fibre_injector` operations.
pub type Result<T, E = InjectError> = std::result::Result<T, E>;
