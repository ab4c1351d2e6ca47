/*!
 * Boundary Notifications
 * The seam between the tick loop and whatever tells the user a phase ended
 */

use crate::scheduler::{Phase, Transition};
use std::io::{self, Write};

/// Reacts to a phase boundary after the transition has been applied
pub trait Notifier {
    /// `phase` is the phase the scheduler entered
    fn notify(&mut self, transition: Transition, phase: Phase);
}

/// Terminal bell written to any sink
pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Bell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Notifier for Bell<W> {
    fn notify(&mut self, _transition: Transition, _phase: Phase) {
        // A missing bell is not worth stopping the session for
        let _ = self.out.write_all(b"\x07");
        let _ = self.out.flush();
    }
}

/// Notifier that does nothing, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, _transition: Transition, _phase: Phase) {}
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, transition: Transition, phase: Phase) {
        (**self).notify(transition, phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_writes_bel_byte() {
        let mut bell = Bell::new(Vec::new());
        bell.notify(Transition::EnterSwitch, Phase::Switching);
        bell.notify(Transition::Cycle, Phase::Working);
        assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn test_boxed_notifier_forwards() {
        let mut boxed: Box<dyn Notifier> = Box::new(Silent);
        boxed.notify(Transition::Cycle, Phase::Resting);
    }
}
