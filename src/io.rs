//! Reading raw datasets and writing one file per size tier.
//!
//! Tier files are named after the input: `vsop87a_raw.json` gives `vsop87a_small.json`,
//! `vsop87a_medium.json` and `vsop87a_large.json`.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use crate::ephem_errors::EphemError;
use crate::series::SeriesDataset;
use crate::truncation::tier::SizeTier;
use crate::truncation::TierOutput;

/// Read and validate a dataset file.
pub fn read_dataset<D: SeriesDataset>(path: &Utf8Path) -> Result<D, EphemError> {
    let content = std::fs::read_to_string(path)?;
    D::from_json_str(&content)
}

/// Write a dataset with compact coefficients, return the number of bytes written.
pub fn write_dataset<D: SeriesDataset>(dataset: &D, path: &Utf8Path) -> Result<usize, EphemError> {
    let json = dataset.to_json()?;
    std::fs::write(path, &json)?;
    Ok(json.len())
}

/// File name of `tier` for the dataset read from `input`.
///
/// A trailing `_raw` is removed from the input stem.
pub fn tier_file_name(input: &Utf8Path, tier: SizeTier) -> Result<String, EphemError> {
    let stem = input
        .file_stem()
        .ok_or_else(|| EphemError::Utf8PathError(format!("no file name in {input}")))?;
    let stem = stem.strip_suffix("_raw").unwrap_or(stem);
    Ok(format!("{stem}_{tier}.json"))
}

/// A tier file written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenTier {
    pub tier: SizeTier,
    pub path: Utf8PathBuf,
    pub bytes: usize,
}

/// Write every tier output into `output_dir`, creating it if needed.
pub fn write_tiers<D: SeriesDataset>(
    outputs: &[TierOutput<D>],
    input: &Utf8Path,
    output_dir: &Utf8Path,
) -> Result<Vec<WrittenTier>, EphemError> {
    std::fs::create_dir_all(output_dir)?;
    outputs
        .iter()
        .map(|output| {
            let path = output_dir.join(tier_file_name(input, output.tier)?);
            let bytes = write_dataset(&output.dataset, &path)?;
            info!(tier = %output.tier, path = %path, bytes, "wrote tier file");
            Ok(WrittenTier {
                tier: output.tier,
                path,
                bytes,
            })
        })
        .collect()
}

#[cfg(test)]
mod io_test {
    use super::*;
    use crate::series::lunar::LunarDataset;

    const MOON: &str = r#"{"_comment":"raw","W":[3.81,8399.68,0,0,0],"groups":[{"coord":2,"alpha":0,"coeffs":[385000.52719,1.5707963267948966,0,0,0,0]}]}"#;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_tier_file_name() {
        let name = tier_file_name(Utf8Path::new("json/vsop87a_raw.json"), SizeTier::Small);
        assert_eq!(name.unwrap(), "vsop87a_small.json");
        let name = tier_file_name(Utf8Path::new("mpp02_llr.json"), SizeTier::Large);
        assert_eq!(name.unwrap(), "mpp02_llr_large.json");
        assert!(matches!(
            tier_file_name(Utf8Path::new(""), SizeTier::Large),
            Err(EphemError::Utf8PathError(_))
        ));
    }

    #[test]
    fn test_read_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        let input = root.join("mpp02_raw.json");
        std::fs::write(&input, MOON).unwrap();

        let dataset: LunarDataset = read_dataset(&input).unwrap();
        let copy = root.join("copy.json");
        let bytes = write_dataset(&dataset, &copy).unwrap();
        assert_eq!(bytes, std::fs::metadata(&copy).unwrap().len() as usize);
        assert_eq!(read_dataset::<LunarDataset>(&copy).unwrap(), dataset);
    }

    #[test]
    fn test_write_tiers() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        let input = root.join("mpp02_raw.json");
        let dataset = LunarDataset::from_json_str(MOON).unwrap();
        let outputs: Vec<TierOutput<LunarDataset>> = SizeTier::ALL
            .iter()
            .map(|&tier| TierOutput {
                tier,
                dataset: dataset.clone(),
                report: crate::truncation::report::TruncationReport {
                    tier,
                    settings: crate::truncation::tier::TierSettings::new(1e-7, 10.0),
                    bodies: vec![],
                    excluded: vec![],
                },
            })
            .collect();

        let written = write_tiers(&outputs, &input, &root.join("out")).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(written[1].path, root.join("out").join("mpp02_medium.json"));
        assert!(written.iter().all(|w| w.path.exists()));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_dataset::<LunarDataset>(Utf8Path::new("/nonexistent/mpp02_raw.json")),
            Err(EphemError::IoError(_))
        ));
    }
}
