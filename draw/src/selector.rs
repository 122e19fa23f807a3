// Copyright (c) 2024 Botho Foundation

//! Weighted winner selection.
//!
//! Each eligible participant holds `1 / (1 + wins)` tickets. A uniform sample
//! `r` in `[0, total)` is drawn and the tickets are walked in name order; the
//! first participant whose cumulative weight reaches `r` wins. Selection
//! probability is therefore `tickets / total` for every participant.

use rand::Rng;
use tracing::debug;

use crate::{EligibilityPool, Ticket, WinRecords};

/// Tickets held by a participant with `wins` prior wins.
///
/// Always in `(0, 1]` and strictly decreasing in `wins`.
pub fn ticket_weight(wins: u32) -> f64 {
    1.0 / (1.0 + wins as f64)
}

/// Total weight of a set of tickets.
pub fn total_tickets(tickets: &[Ticket]) -> f64 {
    tickets.iter().map(|t| t.weight).sum()
}

/// Selection probability of each ticket holder, in ticket order.
pub fn chances(tickets: &[Ticket]) -> Vec<(&str, f64)> {
    let total = total_tickets(tickets);
    tickets
        .iter()
        .map(|t| {
            let chance = if total > 0.0 { t.weight / total } else { 0.0 };
            (t.name.as_str(), chance)
        })
        .collect()
}

/// Draw one ticket, weighted by ticket weight.
///
/// Returns `None` for an empty slice without touching `rng`.
pub fn select_from_tickets<'a, R: Rng>(
    tickets: &'a [Ticket],
    rng: &mut R,
) -> Option<&'a Ticket> {
    if tickets.is_empty() {
        return None;
    }

    let total = total_tickets(tickets);
    let sample = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;

    for ticket in tickets {
        cumulative += ticket.weight;
        if cumulative >= sample {
            return Some(ticket);
        }
    }

    // Rounding can leave the sample a hair above the final cumulative sum.
    tickets.last()
}

/// Pick the winner of one item from its eligibility pool.
///
/// Returns `None` when the pool is empty, without touching `rng`.
pub fn select_winner<R: Rng>(
    pool: &EligibilityPool,
    records: &WinRecords,
    rng: &mut R,
) -> Option<String> {
    if pool.is_empty() {
        return None;
    }

    let tickets = pool.tickets(records);
    let winner = select_from_tickets(&tickets, rng)?;
    debug!(
        pool = tickets.len(),
        total = total_tickets(&tickets),
        winner = %winner.name,
        "Weighted draw"
    );
    Some(winner.name.clone())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{rngs::mock::StepRng, rngs::StdRng, RngCore, SeedableRng};

    use super::*;
    use crate::DrawError;

    /// Counts how many random words were consumed.
    struct CountingRng {
        inner: StepRng,
        calls: usize,
    }

    impl CountingRng {
        fn new() -> Self {
            Self {
                inner: StepRng::new(0, 0),
                calls: 0,
            }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.calls += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.calls += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.calls += 1;
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.calls += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    fn records_with(wins: &[(&str, u32)]) -> WinRecords {
        let mut records = WinRecords::new();
        for &(name, count) in wins {
            records.register(name);
            for _ in 0..count {
                records.record_win(name).unwrap();
            }
        }
        records
    }

    #[test]
    fn test_ticket_weight_is_strictly_decreasing() {
        assert_eq!(ticket_weight(0), 1.0);
        assert!(ticket_weight(0) > ticket_weight(1));
        assert!(ticket_weight(1) > ticket_weight(2));
        assert!(ticket_weight(2) > ticket_weight(3));
        assert!(ticket_weight(u32::MAX) > 0.0);
    }

    #[test]
    fn test_empty_pool_has_no_winner_and_consumes_no_randomness() {
        let mut rng = CountingRng::new();
        let winner = select_winner(&EligibilityPool::default(), &WinRecords::new(), &mut rng);

        assert!(winner.is_none());
        assert_eq!(rng.calls, 0);
        assert!(select_from_tickets(&[], &mut rng).is_none());
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn test_winner_is_always_from_pool() {
        let records = records_with(&[("x", 0), ("y", 3), ("z", 1)]);
        let pool = EligibilityPool::new(["x", "y", "z"]);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..1_000 {
            let winner = select_winner(&pool, &records, &mut rng).unwrap();
            assert!(pool.contains(&winner), "fabricated winner {}", winner);
        }
    }

    #[test]
    fn test_non_empty_tickets_always_select() {
        let tickets = vec![
            Ticket::new("a", u32::MAX),
            Ticket::new("b", 0),
            Ticket::new("c", 7),
        ];

        for start in [0, 1, 1u64 << 62, 1u64 << 63, u64::MAX - 1, u64::MAX] {
            let mut rng = StepRng::new(start, 0);
            assert!(select_from_tickets(&tickets, &mut rng).is_some(), "sample {}", start);
        }
        assert!(DrawError::NoWinnerSelected("Lamp".to_string())
            .to_string()
            .contains("Lamp"));
    }

    #[test]
    fn test_zero_sample_picks_first_in_name_order() {
        let records = records_with(&[("carol", 0), ("alice", 2), ("bob", 0)]);
        let pool = EligibilityPool::new(["carol", "bob", "alice"]);
        let mut rng = StepRng::new(0, 0);

        // alice sorts first, even though she holds the fewest tickets
        assert_eq!(select_winner(&pool, &records, &mut rng).as_deref(), Some("alice"));
        assert_eq!(select_winner(&pool, &records, &mut rng).as_deref(), Some("alice"));
    }

    #[test]
    fn test_max_sample_picks_last_in_name_order() {
        let records = records_with(&[("a", 0), ("b", 1), ("c", 5)]);
        let pool = EligibilityPool::new(["a", "b", "c"]);
        let mut rng = StepRng::new(u64::MAX, 0);

        assert_eq!(select_winner(&pool, &records, &mut rng).as_deref(), Some("c"));
    }

    #[test]
    fn test_cumulative_boundary_goes_to_earlier_participant() {
        // sample lands exactly on the boundary between a and b
        let tickets = vec![Ticket::new("a", 0), Ticket::new("b", 0)];
        let half = 1u64 << 63;
        let mut rng = StepRng::new(half, 0);

        assert_eq!(select_from_tickets(&tickets, &mut rng).unwrap().name, "a");
    }

    #[test]
    fn test_same_seed_same_winners() {
        let records = records_with(&[("x", 0), ("y", 1), ("z", 2)]);
        let pool = EligibilityPool::new(["x", "y", "z"]);

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| select_winner(&pool, &records, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_chances_sum_to_one() {
        let tickets = vec![Ticket::new("x", 0), Ticket::new("y", 1), Ticket::new("z", 2)];
        let shares = chances(&tickets);

        let sum: f64 = shares.iter().map(|(_, c)| c).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((shares[0].1 - 6.0 / 11.0).abs() < 1e-12);
        assert!((shares[1].1 - 3.0 / 11.0).abs() < 1e-12);
        assert!((shares[2].1 - 2.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_empirical_frequencies_match_ticket_share() {
        let records = records_with(&[("x", 0), ("y", 1), ("z", 2)]);
        let pool = EligibilityPool::new(["x", "y", "z"]);
        let tickets = pool.tickets(&records);
        let expected: HashMap<&str, f64> = chances(&tickets).into_iter().collect();

        let draws = 100_000;
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..draws {
            let winner = select_winner(&pool, &records, &mut rng).unwrap();
            *counts.entry(winner).or_default() += 1;
        }

        for (name, share) in expected {
            let observed = counts.get(name).copied().unwrap_or(0) as f64 / draws as f64;
            assert!(
                (observed - share).abs() < 0.01,
                "{}: observed {:.4}, expected {:.4}",
                name,
                observed,
                share
            );
        }
    }
}
