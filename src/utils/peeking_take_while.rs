//! A peeking `take_while` for peekable iterators.
//!
//! Unlike `take_while`, the first item failing the predicate stays in the
//! underlying iterator, so the tokenizer can stop at the end of a digit run
//! without consuming whatever follows it.

use std::iter::Peekable;

pub struct PeekingTakeWhile<I, P> {
    iter: I,
    predicate: P,
}

impl<I, P> Iterator for PeekingTakeWhile<&mut Peekable<I>, P>
where
    I: Iterator,
    P: Fn(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.iter.next_if(&self.predicate)
    }
}

pub trait PeekingTakeWhileExt: Sized + Iterator {
    fn peeking_take_while<P>(self, predicate: P) -> PeekingTakeWhile<Self, P>
    where
        P: Fn(&Self::Item) -> bool;
}

impl<I: Iterator> PeekingTakeWhileExt for &mut Peekable<I> {
    /// Yield items while `predicate` holds. The first item that fails it is
    /// left in place for the next `peek`/`next`.
    fn peeking_take_while<P>(self, predicate: P) -> PeekingTakeWhile<Self, P>
    where
        P: Fn(&I::Item) -> bool,
    {
        PeekingTakeWhile {
            iter: self,
            predicate,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::peeking_take_while::PeekingTakeWhileExt;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input() {
        assert_eq!(
            std::iter::empty::<()>()
                .peekable()
                .peeking_take_while(|_| true)
                .collect::<Vec<()>>(),
            vec![]
        )
    }

    #[test]
    fn stops_before_first_non_digit() {
        let mut chars = "405+3".chars().peekable();

        assert_eq!(
            chars
                .peeking_take_while(|c| c.is_ascii_digit())
                .collect::<String>(),
            "405"
        );
        assert_eq!(chars.next(), Some('+'));
    }

    #[test]
    fn leaves_everything_when_first_item_fails() {
        let mut chars = "+3".chars().peekable();

        assert_eq!(
            chars
                .peeking_take_while(|c| c.is_ascii_digit())
                .count(),
            0
        );
        assert_eq!(chars.collect::<String>(), "+3");
    }
}
