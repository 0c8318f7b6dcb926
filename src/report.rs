use std::path::Path;

use crate::error::Result;
use crate::pipeline::Prediction;

/// Writes one `Fold,Row,Actual,Predicted` record per classified row.
pub fn write_predictions<P: AsRef<Path>>(path: P, predictions: &[Prediction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["Fold", "Row", "Actual", "Predicted"])?;
    for prediction in predictions {
        writer.write_record([
            prediction.fold.to_string(),
            prediction.row.to_string(),
            prediction.actual.clone(),
            prediction.predicted.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
