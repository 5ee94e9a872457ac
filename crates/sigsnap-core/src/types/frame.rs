//! Snapshot frame chain and the frame-source seam.

use super::value::CapturedValue;

/// One captured activation record.
///
/// Unlike a live runtime frame, a `FrameSnapshot` owns its data: the
/// locals are copies taken at the instant of signal delivery and the
/// parent chain is part of the snapshot itself, so rendering needs no
/// further cooperation from the interrupted code.
///
/// Local names are unique within one frame; recording a name twice
/// replaces the earlier value.
#[derive(Debug, Clone)]
pub struct FrameSnapshot
{
    method: String,
    line: u32,
    locals: Vec<(String, CapturedValue)>,
    scope: String,
    parent: Option<Box<FrameSnapshot>>,
}

impl FrameSnapshot
{
    /// Frame with no locals and no parent.
    pub fn new(method: impl Into<String>, line: u32, scope: impl Into<String>) -> Self
    {
        Self {
            method: method.into(),
            line,
            locals: Vec::new(),
            scope: scope.into(),
            parent: None,
        }
    }

    /// Attach the caller of this frame.
    #[must_use]
    pub fn with_parent(mut self, parent: FrameSnapshot) -> Self
    {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Record a local binding, replacing any earlier binding of the same name.
    pub fn record(&mut self, name: impl Into<String>, value: impl Into<CapturedValue>)
    {
        let name = name.into();
        let value = value.into();
        match self.locals.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.locals.push((name, value)),
        }
    }

    /// Method name of this activation.
    #[must_use]
    pub fn method(&self) -> &str
    {
        &self.method
    }

    /// Source line the activation was at when captured.
    #[must_use]
    pub const fn line(&self) -> u32
    {
        self.line
    }

    /// Ordered locals, in recording order.
    #[must_use]
    pub fn locals(&self) -> &[(String, CapturedValue)]
    {
        &self.locals
    }

    /// Look up one local by name.
    #[must_use]
    pub fn local(&self, name: &str) -> Option<&CapturedValue>
    {
        self.locals
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Scope-identity descriptor for this activation.
    #[must_use]
    pub fn scope_identity(&self) -> &str
    {
        &self.scope
    }

    /// The calling frame, if this is not the root.
    #[must_use]
    pub fn parent(&self) -> Option<&FrameSnapshot>
    {
        self.parent.as_deref()
    }

    /// Number of frames in the chain, this one included.
    #[must_use]
    pub fn chain_len(&self) -> usize
    {
        let mut count = 1;
        let mut cursor = self.parent();
        while let Some(frame) = cursor {
            count += 1;
            cursor = frame.parent();
        }
        count
    }
}

/// Source of snapshot frames at the moment of signal delivery.
///
/// This is the supplied capability the rest of the system builds on.
/// Rust cannot enumerate arbitrary live locals by name, so the in-tree
/// implementation ([`ThreadScopes`](crate::capture::ThreadScopes)) is
/// backed by explicit scope instrumentation; a host debugging interface
/// could stand in behind the same trait.
///
/// Implementations are called synchronously on the interrupted thread
/// and must not block.
pub trait FrameSource: Send + Sync
{
    /// Snapshot the innermost frame with its caller chain attached.
    ///
    /// Returns `None` when nothing is instrumented, or when the record
    /// is mid-mutation at the instant of delivery. Either way the
    /// delivery is silently dropped; there is no partial snapshot.
    fn snapshot(&self) -> Option<FrameSnapshot>;
}
