/// Share of completed words among all attempts, as a whole percentage.
///
/// Defined as 0 while nothing has been scored, so an all-mistakes round
/// never divides by zero.
pub fn accuracy(score: u32, mistakes: u32) -> u32 {
    match score {
        0 => 0,
        positive => {
            let total = positive as f64 + mistakes as f64;

            ((positive as f64 / total) * 100.0).round() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_half() {
        assert_eq!(accuracy(2, 2), 50);
    }

    #[test]
    fn test_accuracy_zero_score() {
        assert_eq!(accuracy(0, 5), 0);
        assert_eq!(accuracy(0, 0), 0);
    }

    #[test]
    fn test_accuracy_perfect() {
        assert_eq!(accuracy(7, 0), 100);
    }

    #[test]
    fn test_accuracy_rounds_to_nearest() {
        // 2 / 3 = 66.67
        assert_eq!(accuracy(2, 1), 67);
        // 1 / 3 = 33.33
        assert_eq!(accuracy(1, 2), 33);
    }
}
