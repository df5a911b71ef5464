use serde::Deserialize;

/// Limits for one execution pass.
///
/// Passed by value into [`execute`](crate::interpreter::evaluator::core::execute).
/// Every field has a default, so a partial JSON or TOML document is enough to
/// override a single limit.
///
/// ## Example
/// ```
/// use partscript::interpreter::settings::ExecutorSettings;
///
/// let settings: ExecutorSettings = serde_json::from_str(r#"{ "max_steps": 500 }"#).unwrap();
///
/// assert_eq!(settings.max_steps, 500);
/// assert_eq!(settings.max_call_depth, ExecutorSettings::default().max_call_depth);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorSettings {
    /// Statements plus expressions evaluated before the pass is aborted with
    /// `ResourceExhausted`.
    pub max_steps:      usize,
    /// Nested user function calls allowed before the pass is aborted with
    /// `ResourceExhausted`.
    pub max_call_depth: usize,
    /// Expressions evaluated inside one another, across calls, before the
    /// pass is aborted with `ResourceExhausted`. Keeps evaluation of deeply
    /// nested code off the end of the stack.
    pub max_depth:      usize,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self { max_steps:      100_000,
               max_call_depth: 64,
               max_depth:      256, }
    }
}
