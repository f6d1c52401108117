//! Stages command - Print the stage sequence

use crate::domain::stage_labels;
use crate::errors::Result;

pub async fn run() -> Result<()> {
    for (index, label) in stage_labels().iter().enumerate() {
        println!("{}  {}", index, label);
    }
    Ok(())
}
