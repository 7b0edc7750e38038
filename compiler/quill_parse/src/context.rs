//! Static context checks for `return`, `break` and `continue`.

/// Construct the parser is currently inside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseContext {
    Function,
    Loop,
    Conditional,
    Switch,
}

/// Stack of enclosing constructs, innermost last.
#[derive(Default, Debug)]
pub struct ContextStack {
    stack: Vec<ParseContext>,
}

impl ContextStack {
    pub fn push(&mut self, ctx: ParseContext) {
        self.stack.push(ctx);
    }

    pub fn pop(&mut self, expected: ParseContext) {
        let popped = self.stack.pop();
        debug_assert_eq!(popped, Some(expected), "unbalanced parse context");
    }

    /// `return` is legal anywhere inside a function.
    pub fn allows_return(&self) -> bool {
        self.stack.contains(&ParseContext::Function)
    }

    /// `break`/`continue` need a loop inside the innermost function.
    /// A loop outside that function does not count.
    pub fn allows_loop_exit(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .take_while(|ctx| **ctx != ParseContext::Function)
            .any(|ctx| *ctx == ParseContext::Loop)
    }
}
