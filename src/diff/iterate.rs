//! Lazy iteration of a difference operator.

use super::DiffRule;
use std::ops::Sub;

/// Number of operator applications needed to collapse a sequence of `len`
/// elements to length one or less.
pub fn steps_to_collapse(len: usize, rule: DiffRule) -> usize {
    if len <= 1 {
        return 0;
    }
    let k = rule.shrink();
    (len - 1 + k - 1) / k
}

/// Number of sequences `iterate_rule` yields for an input of `len` elements.
#[inline]
pub fn frame_count(len: usize, rule: DiffRule) -> usize {
    steps_to_collapse(len, rule) + 1
}

/// Iterator over successive difference sequences.
///
/// Yields the input first, then keeps applying the rule while the current
/// sequence has more than one element. Call [`iterate_rule`] again with the
/// original input to restart.
#[derive(Debug, Clone)]
pub struct IteratedDifferences<T> {
    next: Option<Vec<T>>,
    rule: DiffRule,
}

/// Starts iterating `rule` over `seq`.
pub fn iterate_rule<T>(seq: Vec<T>, rule: DiffRule) -> IteratedDifferences<T>
where
    for<'a> &'a T: Sub<&'a T, Output = T>,
{
    IteratedDifferences {
        next: Some(seq),
        rule,
    }
}

impl<T> IteratedDifferences<T> {
    /// The operator being iterated.
    pub fn rule(&self) -> DiffRule {
        self.rule
    }

    fn remaining(&self) -> usize {
        self.next
            .as_ref()
            .map_or(0, |seq| frame_count(seq.len(), self.rule))
    }
}

impl<T> Iterator for IteratedDifferences<T>
where
    for<'a> &'a T: Sub<&'a T, Output = T>,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        let current = self.next.take()?;
        if current.len() > 1 {
            self.next = Some(self.rule.apply(&current));
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for IteratedDifferences<T> where
    for<'a> &'a T: Sub<&'a T, Output = T>
{
}

impl<T> std::iter::FusedIterator for IteratedDifferences<T> where
    for<'a> &'a T: Sub<&'a T, Output = T>
{
}
