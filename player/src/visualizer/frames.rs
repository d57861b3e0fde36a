/// Holds the pending frame of a render loop.
///
/// `H` is whatever handle cancels the scheduled frame when dropped. A slot is
/// started once and, once stopped, drops every handle it is given.
#[derive(Debug)]
pub enum FrameSlot<H> {
    Idle,
    Running(H),
    Stopped,
}

impl<H> Default for FrameSlot<H> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<H> FrameSlot<H> {
    /// True until the loop has scheduled its first frame or was stopped.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Stores the next pending frame, dropping the previous one. Returns false
    /// when the slot is stopped and the handle was dropped instead.
    pub fn schedule(&mut self, handle: H) -> bool {
        match self {
            Self::Stopped => false,
            _ => {
                *self = Self::Running(handle);
                true
            }
        }
    }

    /// Cancels the pending frame for good. Returns whether one was pending.
    pub fn stop(&mut self) -> bool {
        matches!(std::mem::replace(self, Self::Stopped), Self::Running(_))
    }
}
