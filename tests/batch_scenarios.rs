//! Batch driver scenarios: one pipeline run per target, failures isolated.

mod helpers;

use helpers::{stage_script, write_resume, MockBackend};
use mailsmith::artifact::ArtifactWriter;
use mailsmith::batch::{BatchDriver, BatchReport, RunStatus};
use mailsmith::core::{EmailPipeline, Profile, Target};

fn profile() -> Profile {
    Profile {
        position: "AI/ML internship".to_string(),
        contact_block: "Test Candidate".to_string(),
    }
}

const SUBJECT: &str = "Application for an Intern Role at {{ company }}";

#[tokio::test]
async fn generated_artifact_lands_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let resume = write_resume(&dir);
    let output_dir = dir.path().join("generated_emails");

    let pipeline = EmailPipeline::new(MockBackend::new(stage_script()), profile());
    let writer = ArtifactWriter::new(&output_dir);
    let driver = BatchDriver::new(&pipeline, &writer, None, &resume, &resume, SUBJECT);

    let target = Target::new("Acme Corp", "Jordan Lee", "jordan@acme.example");
    let summary = driver.process(&target).await;

    assert_eq!(summary.status, RunStatus::Generated);
    assert!(summary.error.is_none());

    let path = summary.artifact_path.unwrap();
    assert_eq!(path, output_dir.join("email_acme_corp.txt"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), stage_script()[4]);
}

#[tokio::test]
async fn a_failing_target_does_not_poison_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let resume = write_resume(&dir);
    let output_dir = dir.path().join("generated_emails");

    // Fail the first target's research call; the script then realigns so
    // the second target runs clean.
    let backend = MockBackend::new(stage_script()).failing_at(0);
    let pipeline = EmailPipeline::new(backend, profile());
    let writer = ArtifactWriter::new(&output_dir);
    let driver = BatchDriver::new(&pipeline, &writer, None, &resume, &resume, SUBJECT);

    let first = driver
        .process(&Target::new("Acme Corp", "Jordan Lee", "jordan@acme.example"))
        .await;
    assert_eq!(first.status, RunStatus::Failed);
    assert!(first.artifact_path.is_none());
    assert!(first.error.is_some());

    let second = driver
        .process(&Target::new("Initech", "Sam Roy", "sam@initech.example"))
        .await;
    assert_eq!(second.status, RunStatus::Generated);
    assert!(output_dir.join("email_initech.txt").exists());

    let report = BatchReport::new(vec![first, second]);
    assert_eq!(report.generated(), 1);
    assert_eq!(report.failed(), 1);
}

#[tokio::test]
async fn missing_resume_fails_every_target_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("generated_emails");
    let resume = dir.path().join("no-such-resume.txt");

    let pipeline = EmailPipeline::new(MockBackend::new(stage_script()), profile());
    let writer = ArtifactWriter::new(&output_dir);
    let driver = BatchDriver::new(&pipeline, &writer, None, &resume, &resume, SUBJECT);

    let summary = driver
        .process(&Target::new("Acme Corp", "Jordan Lee", "jordan@acme.example"))
        .await;

    assert_eq!(summary.status, RunStatus::Failed);
    assert!(!output_dir.exists());
    assert_eq!(pipeline.backend().call_count(), 0);
}

#[test]
fn report_serializes_statuses_as_snake_case() {
    let report = serde_json::to_value(RunStatus::DeliveryFailed).unwrap();
    assert_eq!(report, serde_json::json!("delivery_failed"));
}
