//! Developer-supplied behavior overrides.
//!
//! The `Custom*` request variants let an application replace a built-in
//! behavior without forking the steering layer.  Overrides are resolved
//! through a registry configured once at agent setup — there is no per-call
//! "is the delegate null?" checking; an unregistered slot simply computes
//! the built-in fallback.

use crate::behaviours::{compute_primitive, SteeringContext};
use crate::input::SteeringRequest;
use crate::output::BehaviourOutput;

/// A replacement implementation for one override slot.
///
/// Implementations must be `Send + Sync`: the same registry is shared by
/// every agent that was configured with it, potentially across Rayon
/// workers.
pub trait CustomBehaviour: Send + Sync + 'static {
    /// Compute the output for `request`.
    ///
    /// `request` is the original `Custom*` variant (with its payload), so an
    /// override can read the same parameters the built-in would.
    fn compute(&self, request: &SteeringRequest, ctx: &SteeringContext<'_>) -> BehaviourOutput;
}

/// Blanket impl so plain closures can be registered.
impl<F> CustomBehaviour for F
where
    F: Fn(&SteeringRequest, &SteeringContext<'_>) -> BehaviourOutput + Send + Sync + 'static,
{
    fn compute(&self, request: &SteeringRequest, ctx: &SteeringContext<'_>) -> BehaviourOutput {
        self(request, ctx)
    }
}

/// Which override slot a `Custom*` request resolves through.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum OverrideSlot {
    Idle,
    Seek,
    Flee,
    Pursuit,
    Evasion,
    Unblock,
    Dock,
}

/// The override registry, resolved once at agent setup.
#[derive(Default)]
pub struct BehaviourOverrides {
    idle:    Option<Box<dyn CustomBehaviour>>,
    seek:    Option<Box<dyn CustomBehaviour>>,
    flee:    Option<Box<dyn CustomBehaviour>>,
    pursuit: Option<Box<dyn CustomBehaviour>>,
    evasion: Option<Box<dyn CustomBehaviour>>,
    unblock: Option<Box<dyn CustomBehaviour>>,
    dock:    Option<Box<dyn CustomBehaviour>>,
}

impl BehaviourOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an override.  Replaces any previous one in the same slot.
    pub fn set(&mut self, slot: OverrideSlot, behaviour: Box<dyn CustomBehaviour>) {
        *self.slot_mut(slot) = Some(behaviour);
    }

    /// Builder-style [`set`][Self::set].
    pub fn with(mut self, slot: OverrideSlot, behaviour: Box<dyn CustomBehaviour>) -> Self {
        self.set(slot, behaviour);
        self
    }

    /// `true` if `slot` has an override installed.
    pub fn has(&self, slot: OverrideSlot) -> bool {
        self.slot_ref(slot).is_some()
    }

    /// Compute `request` through the registry.
    ///
    /// Non-custom requests and custom requests with an empty slot compute
    /// the built-in; a populated slot delegates to the override.
    pub fn compute(&self, request: &SteeringRequest, ctx: &SteeringContext<'_>) -> BehaviourOutput {
        match Self::slot_of(request) {
            Some(slot) => match self.slot_ref(slot) {
                Some(custom) => custom.compute(request, ctx),
                None => compute_primitive(request, ctx),
            },
            None => compute_primitive(request, ctx),
        }
    }

    fn slot_of(request: &SteeringRequest) -> Option<OverrideSlot> {
        match request {
            SteeringRequest::CustomIdle => Some(OverrideSlot::Idle),
            SteeringRequest::CustomSeek { .. } => Some(OverrideSlot::Seek),
            SteeringRequest::CustomFlee { .. } => Some(OverrideSlot::Flee),
            SteeringRequest::CustomPursuit { .. } => Some(OverrideSlot::Pursuit),
            SteeringRequest::CustomEvasion { .. } => Some(OverrideSlot::Evasion),
            SteeringRequest::CustomUnblock { .. } => Some(OverrideSlot::Unblock),
            SteeringRequest::CustomDock { .. } => Some(OverrideSlot::Dock),
            _ => None,
        }
    }

    fn slot_ref(&self, slot: OverrideSlot) -> Option<&dyn CustomBehaviour> {
        let opt = match slot {
            OverrideSlot::Idle => &self.idle,
            OverrideSlot::Seek => &self.seek,
            OverrideSlot::Flee => &self.flee,
            OverrideSlot::Pursuit => &self.pursuit,
            OverrideSlot::Evasion => &self.evasion,
            OverrideSlot::Unblock => &self.unblock,
            OverrideSlot::Dock => &self.dock,
        };
        opt.as_deref()
    }

    fn slot_mut(&mut self, slot: OverrideSlot) -> &mut Option<Box<dyn CustomBehaviour>> {
        match slot {
            OverrideSlot::Idle => &mut self.idle,
            OverrideSlot::Seek => &mut self.seek,
            OverrideSlot::Flee => &mut self.flee,
            OverrideSlot::Pursuit => &mut self.pursuit,
            OverrideSlot::Evasion => &mut self.evasion,
            OverrideSlot::Unblock => &mut self.unblock,
            OverrideSlot::Dock => &mut self.dock,
        }
    }
}
