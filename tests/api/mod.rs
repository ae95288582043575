use smarterr::traits::MemFs;
use smarterr::Environment;

mod capture;
mod enrich;
mod logging;

/// Environment over an in-memory tree rooted at `internal`.
fn environment(files: &[(&str, &str)]) -> Environment {
    let fs = files.iter().fold(MemFs::new(), |fs, (path, contents)| {
        fs.with_file(path, contents)
    });
    Environment::new().with_filesystem(fs, "internal")
}

const SERVICE_CONFIG: &str = r#"
parameter "service" {
  value = "Default"
}

token "service" {
  source    = "parameter"
  parameter = "service"
}

template "error_summary" {
  format = "creating {{.service}}"
}
"#;

const LOGS_CONFIG: &str = r#"
parameter "service" {
  value = "CloudWatch"
}
"#;
