//! Timed attack warnings handed to the rendering collaborator.

use letter_siege_core::TelegraphDescriptor;

/// Telegraph warning together with its progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveTelegraph {
    /// Warning parameters.
    pub descriptor: TelegraphDescriptor,
    /// Milliseconds since the warning was posted.
    pub elapsed_ms: f32,
}

impl ActiveTelegraph {
    /// Progress towards the attack in `0.0..=1.0`.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        if self.descriptor.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.descriptor.duration_ms).clamp(0.0, 1.0)
    }
}

/// Board of live telegraph warnings.
#[derive(Clone, Debug, Default)]
pub struct TelegraphBoard {
    entries: Vec<ActiveTelegraph>,
}

impl TelegraphBoard {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Posts a warning.
    pub fn post(&mut self, descriptor: TelegraphDescriptor) {
        self.entries.push(ActiveTelegraph {
            descriptor,
            elapsed_ms: 0.0,
        });
    }

    /// Ages every warning and removes the ones whose duration has passed.
    pub fn update(&mut self, dt_ms: f32) {
        let dt_ms = dt_ms.max(0.0);
        self.entries.retain_mut(|entry| {
            entry.elapsed_ms += dt_ms;
            entry.elapsed_ms < entry.descriptor.duration_ms
        });
    }

    /// Live warnings in posting order.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveTelegraph> + '_ {
        self.entries.iter()
    }

    /// Number of live warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every warning.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
