use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::optimizer::global::ScaleCandidate;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write every sampled candidate to a CSV file, in scan order.
pub fn write_csv(candidates: &[ScaleCandidate], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "index", "factor", "deviation", "protein", "carbs", "fats", "calorie",
    ])?;

    for (i, candidate) in candidates.iter().enumerate() {
        wtr.write_record([
            i.to_string(),
            format!("{:.3}", candidate.factor),
            format!("{:.4}", candidate.score),
            format!("{:.2}", candidate.totals.protein),
            format!("{:.2}", candidate.totals.carbs),
            format!("{:.2}", candidate.totals.fats),
            format!("{:.1}", candidate.totals.calorie),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the winning candidate to a JSON file with rounded floats.
pub fn write_best_json(best: &ScaleCandidate, samples: usize, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "scale_factor": truncate(best.factor, 3),
        "deviation_percent": truncate(best.score, 4),
        "samples": samples,
        "total_nutrients": {
            "protein": truncate(best.totals.protein, 2),
            "carbs": truncate(best.totals.carbs, 2),
            "fats": truncate(best.totals.fats, 2),
            "calorie": truncate(best.totals.calorie, 1),
        },
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Indices of the `k` lowest-deviation candidates, ties in scan order.
pub fn top_indices(candidates: &[ScaleCandidate], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..candidates.len()).collect();
    indices.sort_by(|&a, &b| {
        candidates[a]
            .score
            .partial_cmp(&candidates[b].score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(k);
    indices
}

/// Print the top-k candidates to stdout.
pub fn print_topk(candidates: &[ScaleCandidate], k: usize) {
    let top = top_indices(candidates, k);
    println!("\n=== Top {} Scale Factors (by deviation) ===\n", top.len());

    for (rank, &idx) in top.iter().enumerate() {
        let c = &candidates[idx];
        println!(
            "#{}: factor={:.3} deviation={:.3}% {}",
            rank + 1,
            c.factor,
            c.score,
            c.totals.debug_string()
        );
    }
    println!();
}
