/// Efficiency score in `[0, 100]`: ratio of the solver's best-known path
/// length to the player's distinct visited-cell count, capped at 100 and
/// rounded to one decimal place.
///
/// `None` when no solver run has recorded a best length this session, or
/// when the player has not moved yet: the score is undefined, not zero.
pub fn compute_score(best_known_path_length: Option<usize>, user_steps: usize) -> Option<f64> {
    let best = best_known_path_length?;
    if best == 0 || user_steps == 0 {
        return None;
    }
    let efficiency = 100.0 * best as f64 / user_steps as f64;
    Some((efficiency.min(100.0) * 10.0).round() / 10.0)
}
