//! Piece supply - piece sources and the lookahead buffer
//!
//! A [`PieceSource`] produces pieces one at a time. [`PieceSupply`] wraps a
//! source with a fixed-depth queue so the next pieces can be previewed:
//! taking the front piece always refills the back, keeping the depth constant.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::PieceKind;

/// Something that produces pieces on demand
pub trait PieceSource {
    fn create(&mut self) -> Result<Piece>;
}

impl<P: PieceSource + ?Sized> PieceSource for Box<P> {
    fn create(&mut self) -> Result<Piece> {
        (**self).create()
    }
}

impl<P: PieceSource + ?Sized> PieceSource for &mut P {
    fn create(&mut self) -> Result<Piece> {
        (**self).create()
    }
}

/// Seedable uniform generator: every kind has equal probability on every call
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next kind without wrapping it in a piece
    pub fn next_kind(&mut self) -> PieceKind {
        let index = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[index]
    }
}

impl PieceSource for PieceGenerator {
    fn create(&mut self) -> Result<Piece> {
        Ok(Piece::new(self.next_kind()))
    }
}

/// Replays a fixed sequence of kinds, then reports exhaustion
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    kinds: VecDeque<PieceKind>,
}

impl ReplaySource {
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Build from a string of kind letters, e.g. `"IOT"`
    pub fn from_letters(letters: &str) -> Result<Self> {
        let kinds = letters
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                let name = c.to_string();
                PieceKind::from_str(&name).ok_or(Error::UnknownPieceKind(name))
            })
            .collect::<Result<VecDeque<_>>>()?;
        Ok(Self { kinds })
    }

    /// Pieces not yet handed out
    pub fn remaining(&self) -> usize {
        self.kinds.len()
    }
}

impl PieceSource for ReplaySource {
    fn create(&mut self) -> Result<Piece> {
        self.kinds
            .pop_front()
            .map(Piece::new)
            .ok_or(Error::SourceExhausted)
    }
}

/// Fixed-depth lookahead buffer over a piece source
#[derive(Debug, Clone)]
pub struct PieceSupply<P> {
    source: P,
    buffer: VecDeque<Piece>,
    depth: usize,
}

impl<P: PieceSource> PieceSupply<P> {
    /// Wrap `source`, pre-filling `depth` pieces
    pub fn new(mut source: P, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(Error::InvalidPreviewDepth);
        }

        let mut buffer = VecDeque::with_capacity(depth + 1);
        for _ in 0..depth {
            buffer.push_back(source.create()?);
        }

        Ok(Self {
            source,
            buffer,
            depth,
        })
    }

    /// Pop the front piece and append a freshly generated one
    pub fn take(&mut self) -> Result<Piece> {
        // Generate first so a failing source leaves the queue untouched.
        let fresh = self.source.create()?;
        self.buffer.push_back(fresh);
        self.buffer.pop_front().ok_or(Error::SourceExhausted)
    }

    /// Piece `offset` places ahead, without consuming it
    pub fn peek(&self, offset: usize) -> Result<&Piece> {
        self.buffer.get(offset).ok_or(Error::PreviewOutOfRange {
            offset,
            depth: self.depth,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Queued pieces, front first
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.buffer.iter()
    }

    pub fn source(&self) -> &P {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind::*;

    fn kinds(supply: &PieceSupply<ReplaySource>) -> Vec<PieceKind> {
        supply.iter().map(Piece::kind).collect()
    }

    #[test]
    fn test_generator_reference_sequence() {
        let mut generator = PieceGenerator::new(12345);
        let sequence: Vec<PieceKind> = (0..12).map(|_| generator.next_kind()).collect();

        assert_eq!(sequence, vec![Z, J, O, L, O, J, I, S, L, Z, T, J]);
    }

    #[test]
    fn test_generator_covers_all_kinds() {
        let mut generator = PieceGenerator::new(12345);
        let mut seen = Vec::new();
        for _ in 0..7 * 20 {
            let kind = generator.create().unwrap().kind();
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_replay_source_exhausts() {
        let mut source = ReplaySource::new([I, O]);
        assert_eq!(source.create().unwrap().kind(), I);
        assert_eq!(source.create().unwrap().kind(), O);
        assert_eq!(source.create(), Err(Error::SourceExhausted));
    }

    #[test]
    fn test_replay_source_from_letters() {
        let source = ReplaySource::from_letters("I O t").unwrap();
        assert_eq!(source.remaining(), 3);

        assert_eq!(
            ReplaySource::from_letters("IQ").unwrap_err(),
            Error::UnknownPieceKind("Q".to_string())
        );
    }

    #[test]
    fn test_supply_prefills_depth() {
        let supply = PieceSupply::new(ReplaySource::new([I, J, L, O]), 3).unwrap();
        assert_eq!(kinds(&supply), vec![I, J, L]);
        assert_eq!(supply.source().remaining(), 1);
    }

    #[test]
    fn test_take_preserves_depth() {
        let mut supply = PieceSupply::new(PieceGenerator::new(1), 3).unwrap();
        for _ in 0..10 {
            supply.take().unwrap();
            assert_eq!(supply.iter().count(), 3);
            assert!(supply.peek(2).is_ok());
            assert!(supply.peek(3).is_err());
        }
    }

    #[test]
    fn test_take_shifts_queue() {
        let mut supply = PieceSupply::new(ReplaySource::new([I, J, L, O]), 3).unwrap();

        assert_eq!(supply.take().unwrap().kind(), I);
        assert_eq!(kinds(&supply), vec![J, L, O]);
    }

    #[test]
    fn test_peek_out_of_range() {
        let supply = PieceSupply::new(ReplaySource::new([I, J, L]), 3).unwrap();

        assert_eq!(supply.peek(0).unwrap().kind(), I);
        assert_eq!(supply.peek(2).unwrap().kind(), L);
        assert_eq!(
            supply.peek(3).unwrap_err(),
            Error::PreviewOutOfRange {
                offset: 3,
                depth: 3
            }
        );
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = PieceSupply::new(PieceGenerator::new(1), 0).unwrap_err();
        assert_eq!(err, Error::InvalidPreviewDepth);
    }

    #[test]
    fn test_failed_take_keeps_queue() {
        let mut supply = PieceSupply::new(ReplaySource::new([I]), 1).unwrap();
        assert_eq!(supply.take(), Err(Error::SourceExhausted));
        assert_eq!(supply.peek(0).unwrap().kind(), I);
    }
}
