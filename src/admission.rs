/// Defines the action that a thread must take on a request for shared (read) admission to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// No mutation is pending or executing; the thread is admitted as a reader immediately.
    Read,
    /// Mutations are pending while the gate is otherwise idle.
    /// The caller thread must take the responsibility of executing them.
    /// Then, it re-evaluates its admission.
    DrainThenRead,
    /// A mutation is executing, or pending behind active readers.
    /// The caller thread must wait until the gate is released and re-evaluate the admission.
    Wait,
}
