//! Nearest-index probing.
//!
//! [`Probe`] yields indices of a sequence ordered by proximity to a target
//! index. Two directional walks start at the target and are zipped together,
//! one element at a time, until both run out or the cap is reached. The
//! allocator uses it to find an idle voice close to the ideal pitch.

use std::iter::FusedIterator;

/// Which neighbour wins a tie.
///
/// - `Up`: the target itself first, then the index above, then below, ...
/// - `Down`: the target itself first, then the index below, then above, ...
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Up,
    Down,
}

/// One monotonic run of indices, `start` inclusive to `end` exclusive.
#[derive(Clone, Debug)]
struct Walk {
    next: i64,
    end: i64,
    step: i64,
}

impl Walk {
    fn descending(start: i64, stride: i64) -> Self {
        Self {
            next: start,
            end: -1,
            step: -stride,
        }
    }

    fn ascending(start: i64, len: i64, stride: i64) -> Self {
        Self {
            next: start,
            end: len,
            step: stride,
        }
    }

    fn remaining(&self) -> usize {
        let span = if self.step > 0 {
            self.end - self.next
        } else {
            self.next - self.end
        };
        if span <= 0 {
            0
        } else {
            let stride = self.step.abs();
            ((span + stride - 1) / stride) as usize
        }
    }

    fn pull(&mut self) -> Option<usize> {
        let live = if self.step > 0 {
            self.next < self.end
        } else {
            self.next > self.end
        };
        if !live {
            return None;
        }
        let v = self.next;
        self.next += self.step;
        Some(v as usize)
    }
}

/// Finite, restartable iterator of indices in `[0, len)` nearest to a target.
///
/// Built with [`Probe::new`] or [`probe`], then tuned with [`Probe::direction`],
/// [`Probe::limit`] and [`Probe::stride`]. Cloning a fresh probe gives an
/// independent sequence.
#[derive(Clone, Debug)]
pub struct Probe {
    len: usize,
    target: usize,
    direction: Direction,
    stride: usize,
    limit: Option<usize>,
    first: Walk,
    second: Walk,
    first_turn: bool,
    remaining: usize,
}

impl Probe {
    /// Probe a sequence of `len` indices around `target`, biased `Up`, uncapped.
    pub fn new(len: usize, target: usize) -> Self {
        Self::build(len, target, Direction::Up, 1, None)
    }

    /// Set the tie-breaking direction. Restarts the probe.
    pub fn direction(self, direction: Direction) -> Self {
        Self::build(self.len, self.target, direction, self.stride, self.limit)
    }

    /// Cap the number of yielded indices at `limit`. Restarts the probe.
    pub fn limit(self, limit: usize) -> Self {
        Self::build(self.len, self.target, self.direction, self.stride, Some(limit))
    }

    /// Walk each branch in steps of `stride` (0 is treated as 1). Restarts the probe.
    pub fn stride(self, stride: usize) -> Self {
        Self::build(self.len, self.target, self.direction, stride, self.limit)
    }

    fn build(
        len: usize,
        target: usize,
        direction: Direction,
        stride: usize,
        limit: Option<usize>,
    ) -> Self {
        let stride = stride.max(1);
        let (n, t, s) = (len as i64, target.min(i64::MAX as usize) as i64, stride as i64);
        let (first, second) = match direction {
            Direction::Up => (
                Walk::descending(t.min(n - 1), s),
                Walk::ascending(t.saturating_add(1), n, s),
            ),
            Direction::Down => (
                Walk::ascending(t.max(0), n, s),
                Walk::descending((t - 1).min(n - 1), s),
            ),
        };
        Self {
            len,
            target,
            direction,
            stride,
            limit,
            first,
            second,
            first_turn: true,
            remaining: limit.map_or(len, |l| l.min(len)),
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let v = if self.first_turn {
            self.first.pull().or_else(|| self.second.pull())
        } else {
            self.second.pull().or_else(|| self.first.pull())
        };
        self.first_turn = !self.first_turn;
        match v {
            Some(i) => {
                self.remaining -= 1;
                Some(i)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.first.remaining() + self.second.remaining()).min(self.remaining);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Probe {}

impl FusedIterator for Probe {}

/// Functional form of [`Probe`]: `limit = None` searches the whole sequence.
pub fn probe(len: usize, target: usize, direction: Direction, limit: Option<usize>) -> Probe {
    Probe::build(len, target, direction, 1, limit)
}
