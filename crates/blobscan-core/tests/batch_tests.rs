// tests/batch_tests.rs
use blobscan_core::{BatchConfig, BatchRunner, BlobCandidate, BlobDetect};
use std::fs;
use std::path::Path;

/// Each fixture line `x y diameter` becomes one blob.
struct FixtureDetector;

impl BlobDetect for FixtureDetector {
    type Image = Vec<BlobCandidate>;

    fn load(&mut self, path: &Path) -> anyhow::Result<Self::Image> {
        let raw = fs::read_to_string(path)?;
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| -> anyhow::Result<BlobCandidate> {
                let v: Vec<f32> = line
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<Result<_, _>>()?;
                anyhow::ensure!(v.len() == 3, "expected `x y diameter`, got {line:?}");
                Ok(BlobCandidate::new(v[0], v[1], v[2]))
            })
            .collect()
    }

    fn detect(&mut self, image: &Self::Image) -> anyhow::Result<Vec<BlobCandidate>> {
        Ok(image.clone())
    }
}

#[test]
fn test_no_matches_writes_header_only() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("notes.txt"), "1 2 3")?;

    let config = BatchConfig::new(dir.path(), "blob_test_image", ".png");
    let report = BatchRunner::new(config, FixtureDetector).run()?;

    assert_eq!(report.rows, 0);
    assert_eq!(report.processed, 0);
    assert_eq!(report.ignored, 1);
    assert_eq!(
        fs::read_to_string(&report.output_path)?,
        ",x,y,diameter,filename\n"
    );
    Ok(())
}

#[test]
fn test_empty_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut config = BatchConfig::new(dir.path(), "blob_test_image", ".png");
    config.include_index = false;
    let report = BatchRunner::new(config, FixtureDetector).run()?;

    assert_eq!(
        report.output_path,
        dir.path().join("blob_test_image_blob_output.csv")
    );
    assert_eq!(
        fs::read_to_string(&report.output_path)?,
        "x,y,diameter,filename\n"
    );
    Ok(())
}

#[test]
fn test_output_rows_grouped_by_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("blob_test_image_b.png"), "5 6 7\n")?;
    fs::write(
        dir.path().join("blob_test_image_a.png"),
        "10.5 20 8\n30 40.25 9\n",
    )?;

    let config = BatchConfig::new(dir.path(), "blob_test_image", ".png");
    let report = BatchRunner::new(config, FixtureDetector).run()?;

    assert_eq!(report.rows, 3);
    assert_eq!(
        fs::read_to_string(&report.output_path)?,
        ",x,y,diameter,filename\n\
         0,10.5,20,8,blob_test_image_a.png\n\
         1,30,40.25,9,blob_test_image_a.png\n\
         0,5,6,7,blob_test_image_b.png\n"
    );
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    for (i, body) in ["1 1 4\n2 2 4\n", "", "3.75 9 12\n"].iter().enumerate() {
        fs::write(dir.path().join(format!("blob_test_image_{i:02}.png")), body)?;
    }

    let config = BatchConfig::new(dir.path(), "blob_test_image", ".png");

    let first = BatchRunner::new(config.clone(), FixtureDetector).run()?;
    let first_bytes = fs::read(&first.output_path)?;

    // The output file itself does not match the `.png` extension.
    let second = BatchRunner::new(config, FixtureDetector).run()?;
    let second_bytes = fs::read(&second.output_path)?;

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.rows, 3);
    assert_eq!(second.ignored, 1);
    Ok(())
}

#[test]
fn test_matching_subdirectory_fails_loudly() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("blob_test_image_dir.png"))?;

    let config = BatchConfig::new(dir.path(), "blob_test_image", ".png");
    let output = config.output_path();
    let result = BatchRunner::new(config, FixtureDetector).run();

    assert!(result.is_err());
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_unsorted_listing_keeps_every_row() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("blob_test_image_1.png"), "1 1 1\n1 1 1\n1 1 1\n")?;
    fs::write(dir.path().join("blob_test_image_2.png"), "2 2 2\n2 2 2\n2 2 2\n2 2 2\n2 2 2\n")?;

    let mut config = BatchConfig::new(dir.path(), "blob_test_image", ".png");
    config.sort_entries = false;
    let scan = BatchRunner::new(config, FixtureDetector).scan()?;

    assert_eq!(scan.table.len(), 8);
    assert_eq!(scan.table.rows_for("blob_test_image_1.png").count(), 3);
    assert_eq!(scan.table.rows_for("blob_test_image_2.png").count(), 5);

    // Rows stay grouped by file in whichever order the files were visited.
    let first = &scan.processed[0];
    let first_count = scan.table.rows_for(first).count();
    assert!(scan.table.records()[..first_count]
        .iter()
        .all(|r| &r.filename == first));
    Ok(())
}
