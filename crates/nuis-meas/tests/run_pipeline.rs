use std::fs;
use std::path::Path;

use nuis_core::{FourVector, InteractionRecord, NuisError, Particle, Pdg};
use nuis_meas::{
    execute, find_sample, load_run_config, run_samples, MeasurementReport, ReferenceData,
    SampleKind,
};

const MASS_MUON: f64 = 105.658;
const MASS_PION: f64 = 139.570;
const MASS_PI0: f64 = 134.977;
const MASS_PROTON: f64 = 938.272;

fn two_pion_record(p_pi0: f64) -> InteractionRecord {
    let beam = Particle::new(Pdg::NU_MU, FourVector::new(1400.0, 0.0, 0.0, 1400.0));
    InteractionRecord::new(11, beam)
        .with_particle(Particle::new(
            Pdg::MUON,
            FourVector::from_mass(MASS_MUON, 50.0, 0.0, 500.0),
        ))
        .with_particle(Particle::new(
            Pdg::PI_PLUS,
            FourVector::from_mass(MASS_PION, 0.0, 120.0, 150.0),
        ))
        .with_particle(Particle::new(
            Pdg::PI_ZERO,
            FourVector::from_mass(MASS_PI0, 0.0, 0.0, p_pi0),
        ))
        .with_particle(Particle::new(
            Pdg::PROTON,
            FourVector::from_mass(MASS_PROTON, -80.0, 0.0, 200.0),
        ))
}

fn single_pion_record() -> InteractionRecord {
    let beam = Particle::new(Pdg::NU_MU, FourVector::new(1400.0, 0.0, 0.0, 1400.0));
    InteractionRecord::new(11, beam)
        .with_particle(Particle::new(
            Pdg::MUON,
            FourVector::from_mass(MASS_MUON, 50.0, 0.0, 500.0),
        ))
        .with_particle(Particle::new(
            Pdg::PI_PLUS,
            FourVector::from_mass(MASS_PION, 0.0, 120.0, 150.0),
        ))
}

fn records() -> Vec<InteractionRecord> {
    let mut records = Vec::new();
    for index in 0..40 {
        let p_pi0 = 50.0 + 17.0 * f64::from(index);
        records.push(two_pion_record(p_pi0));
        if index % 3 == 0 {
            records.push(single_pion_record());
        }
    }
    records
}

fn write_inputs(dir: &Path, threads: usize) -> std::path::PathBuf {
    let lines: Vec<String> = records()
        .iter()
        .map(|record| serde_json::to_string(record).expect("encode record"))
        .collect();
    fs::write(dir.join("events.jsonl"), lines.join("\n")).expect("write events");
    fs::create_dir_all(dir.join("data")).expect("data dir");
    fs::write(
        dir.join("data/ppi0.txt"),
        "# p_pi0 low edge, events, error\n0.0 8 3\n0.2 12 4\n0.4 9 3\n0.6 6 2\n0.8\n",
    )
    .expect("write data");
    fs::write(
        dir.join("data/ppi0_corr.txt"),
        "1 0.2 0 0\n0.2 1 0.2 0\n0 0.2 1 0.2\n0 0 0.2 1\n",
    )
    .expect("write correlation");
    let config = format!(
        r#"threads: {threads}
generator: synthetic
normalisation:
  event_rate: 5.0
  flux_integral: 1.0
events: events.jsonl
output: reports
samples:
  - name: ANL_CC2pi_1pip1pi0_Evt_1Dppi0_nu
    data:
      values: data/ppi0.txt
      matrix: data/ppi0_corr.txt
      matrix_kind: correlation
"#
    );
    let path = dir.join("run.yaml");
    fs::write(&path, config).expect("write config");
    path
}

#[test]
fn configured_run_writes_hashed_reports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = write_inputs(dir.path(), 2);
    let config = load_run_config(&config_path).expect("config");
    let reports = execute(&config).expect("run");
    assert_eq!(reports.len(), 1);

    let report = &reports[0];
    assert_eq!(report.kind, SampleKind::EventRate);
    assert_eq!(report.processed, records().len() as u64);
    assert_eq!(report.selected, 40);
    assert!(report.chi2.chi2.is_finite());
    assert_eq!(report.chi2.ndof, 4);

    let observed: f64 = report.data.iter().sum();
    let predicted: f64 = report.prediction.iter().sum();
    assert!(predicted <= observed + 1e-6);

    let written = dir
        .path()
        .join("reports")
        .join("ANL_CC2pi_1pip1pi0_Evt_1Dppi0_nu.json");
    let bytes = fs::read(written).expect("report file");
    let restored: MeasurementReport = serde_json::from_slice(&bytes).expect("decode report");
    assert_eq!(restored.name, report.name);
    assert_eq!(restored.report_hash, report.report_hash);
    assert_eq!(restored.selected, report.selected);
}

#[test]
fn thread_count_does_not_change_the_report() {
    let serial_dir = tempfile::tempdir().expect("tempdir");
    let parallel_dir = tempfile::tempdir().expect("tempdir");
    let serial = load_run_config(write_inputs(serial_dir.path(), 1)).expect("serial config");
    let parallel = load_run_config(write_inputs(parallel_dir.path(), 4)).expect("parallel config");

    let records = records();
    let a = run_samples(&serial, &records).expect("serial run");
    let b = run_samples(&parallel, &records).expect("parallel run");
    assert_eq!(a[0].prediction, b[0].prediction);
    assert_eq!(a[0].report_hash, b[0].report_hash);
}

#[test]
fn yaml_reference_data_with_full_covariance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tpi.yaml");
    fs::write(
        &path,
        "bin_edges: [0.0, 100.0, 200.0]\nvalues: [1.0, 2.0]\nerrors: [0.5, 0.5]\n\
covariance:\n  type: full\n  matrix: [[0.25, 0.05], [0.05, 0.25]]\n",
    )
    .expect("write yaml");
    let data = ReferenceData::load(&nuis_meas::DataSource {
        values: path,
        matrix: None,
        matrix_kind: Default::default(),
    })
    .expect("load");
    let covariance = data.build_covariance(false).expect("covariance");
    assert_eq!(covariance.dim(), 2);
    let chi2 = covariance.chi2(&data.values, &data.values).expect("chi2");
    assert!(chi2.abs() < 1e-12);
}

#[test]
fn catalog_lookup_and_unknown_sample() {
    let bebc = find_sample("BEBC_CC1npim_XSec_1DQ2_antinu").expect("bebc");
    assert!(bebc.monitor.is_some());
    assert_eq!(bebc.enu_range.min, 5.0);

    let err = find_sample("MINERvA_CC1pip_XSec_1Dth_nu").expect_err("unknown");
    assert!(matches!(err, NuisError::Sample(_)));
    assert_eq!(err.code(), "unknown-sample");
}

#[test]
fn missing_event_file_is_a_data_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = write_inputs(dir.path(), 1);
    fs::remove_file(dir.path().join("events.jsonl")).expect("remove events");
    let config = load_run_config(&config_path).expect("config");
    let err = execute(&config).expect_err("missing events");
    assert!(matches!(err, NuisError::Io(_)));
    assert_eq!(err.code(), "events-read");
    assert!(err.info().context.contains_key("path"));
}
