//! Per-run state that must not be process-wide.

/// Threaded through one pipeline run.
#[derive(Clone, Debug)]
pub struct CompilationContext {
    next_id: u32,
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl CompilationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_unique_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Internal name for an anonymous, qualified or shadowed function.
    /// Never a valid identifier, so it cannot collide with a source name.
    pub fn next_anonymous_function_name(&mut self) -> String {
        format!("%anon_fun{}", self.next_unique_id())
    }
}
