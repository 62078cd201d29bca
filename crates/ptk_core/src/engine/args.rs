//! Declarative engine argument assembly.
//!
//! Each operation maps its validated options to an ordered list of
//! `{flag, value-or-absent}` pairs, keeping flag assembly total and easy
//! to test. All paths handed to the engine are absolute; callers resolve
//! them before assembly.

use std::path::Path;

use crate::options::{PageImagesOptions, RenderOptions, RotateOptions, SplitOptions, SplitSpec};

/// One argument in an engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A bare flag, e.g. `--overwrite`.
    Flag(&'static str),
    /// A flag with a value, e.g. `--dpi 300`.
    Value(&'static str, String),
}

/// Ordered argument specification for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    /// Subcommand tokens, e.g. `["rotate", "pdf"]`.
    pub subcommand: Vec<&'static str>,
    pub args: Vec<Arg>,
}

impl ArgSpec {
    /// Flatten into the final argument vector.
    pub fn to_args(&self) -> Vec<String> {
        let mut out: Vec<String> = self.subcommand.iter().map(|s| s.to_string()).collect();
        for arg in &self.args {
            match arg {
                Arg::Flag(name) => out.push(name.to_string()),
                Arg::Value(name, value) => {
                    out.push(name.to_string());
                    out.push(value.clone());
                }
            }
        }
        out
    }
}

fn path_value(flag: &'static str, path: &Path) -> Arg {
    Arg::Value(flag, path.display().to_string())
}

/// Arguments for a render run.
pub fn render_args(
    options: &RenderOptions,
    pdf: &Path,
    out_dir: &Path,
    manifest: &Path,
) -> ArgSpec {
    let mut args = vec![
        path_value("--pdf", pdf),
        path_value("--out_dir", out_dir),
        path_value("--manifest", manifest),
        Arg::Value("--dpi", options.dpi.to_string()),
    ];
    if let Some(pages) = &options.pages {
        args.push(Arg::Value("--pages", pages.clone()));
    }
    if options.overwrite {
        args.push(Arg::Flag("--overwrite"));
    }

    ArgSpec {
        subcommand: vec!["render"],
        args,
    }
}

/// Arguments for a split run.
pub fn split_args(
    options: &SplitOptions,
    pdf: &Path,
    out_dir: &Path,
    manifest: &Path,
) -> ArgSpec {
    let mut args = vec![
        path_value("--pdf", pdf),
        path_value("--out_dir", out_dir),
        path_value("--manifest", manifest),
    ];
    match &options.spec {
        SplitSpec::Ranges(ranges) => args.push(Arg::Value("--ranges", ranges.clone())),
        SplitSpec::PagesPerFile(n) => {
            args.push(Arg::Value("--pages_per_file", n.to_string()))
        }
    }
    if options.overwrite {
        args.push(Arg::Flag("--overwrite"));
    }

    ArgSpec {
        subcommand: vec!["split"],
        args,
    }
}

/// Arguments for a rotate run. Output always goes to a run-local PDF.
pub fn rotate_args(
    options: &RotateOptions,
    pdf: &Path,
    out_pdf: &Path,
    manifest: &Path,
) -> ArgSpec {
    let mut args = vec![
        path_value("--pdf", pdf),
        path_value("--out_pdf", out_pdf),
        path_value("--manifest", manifest),
        Arg::Value("--degrees", options.degrees.as_str().to_string()),
    ];
    if let Some(pages) = &options.pages {
        args.push(Arg::Value("--pages", pages.clone()));
    }

    ArgSpec {
        subcommand: vec!["rotate", "pdf"],
        args,
    }
}

/// Arguments for a page-images run.
///
/// Pixel trims are presence-conditional: a zero trim is the engine
/// default and is not passed. The margin fraction and symmetry strategy
/// are not part of the engine contract.
pub fn page_images_args(
    options: &PageImagesOptions,
    in_dir: &Path,
    out_dir: &Path,
    manifest: &Path,
) -> ArgSpec {
    let mut args = vec![
        path_value("--in_dir", in_dir),
        path_value("--out_dir", out_dir),
        path_value("--manifest", manifest),
        Arg::Value("--glob", options.glob.clone()),
        Arg::Value("--mode", options.mode.as_str().to_string()),
    ];
    if options.gutter_trim_px > 0 {
        args.push(Arg::Value(
            "--gutter_trim_px",
            options.gutter_trim_px.to_string(),
        ));
    }
    if options.edge_inset_px > 0 {
        args.push(Arg::Value(
            "--edge_inset_px",
            options.edge_inset_px.to_string(),
        ));
    }
    if options.overwrite {
        args.push(Arg::Flag("--overwrite"));
    }
    if options.debug {
        args.push(Arg::Flag("--debug"));
    }

    ArgSpec {
        subcommand: vec!["page-images"],
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{
        PageImagesForm, RenderForm, RotateForm, SplitForm, SplitStrategy,
    };
    use std::path::PathBuf;

    fn paths() -> (PathBuf, PathBuf, PathBuf) {
        (
            PathBuf::from("/vault/book.pdf"),
            PathBuf::from("/vault/out/run-1"),
            PathBuf::from("/vault/out/run-1/manifest.json"),
        )
    }

    #[test]
    fn render_arg_vector() {
        let (pdf, out_dir, manifest) = paths();
        let options = RenderForm {
            dpi: "144".to_string(),
            pages: "1-5".to_string(),
            overwrite: true,
        }
        .build()
        .unwrap();

        let args = render_args(&options, &pdf, &out_dir, &manifest).to_args();
        assert_eq!(
            args,
            vec![
                "render",
                "--pdf",
                "/vault/book.pdf",
                "--out_dir",
                "/vault/out/run-1",
                "--manifest",
                "/vault/out/run-1/manifest.json",
                "--dpi",
                "144",
                "--pages",
                "1-5",
                "--overwrite",
            ]
        );
    }

    #[test]
    fn render_omits_absent_options() {
        let (pdf, out_dir, manifest) = paths();
        let options = RenderForm::default().build().unwrap();

        let args = render_args(&options, &pdf, &out_dir, &manifest).to_args();
        assert!(!args.contains(&"--pages".to_string()));
        assert!(!args.contains(&"--overwrite".to_string()));
    }

    #[test]
    fn split_strategies_are_mutually_exclusive() {
        let (pdf, out_dir, manifest) = paths();

        let ranges = SplitForm {
            ranges: "1-120,121-240".to_string(),
            ..Default::default()
        }
        .build()
        .unwrap();
        let args = split_args(&ranges, &pdf, &out_dir, &manifest).to_args();
        assert!(args.contains(&"--ranges".to_string()));
        assert!(!args.contains(&"--pages_per_file".to_string()));

        let per_file = SplitForm {
            strategy: SplitStrategy::PagesPerFile,
            pages_per_file: "120".to_string(),
            ..Default::default()
        }
        .build()
        .unwrap();
        let args = split_args(&per_file, &pdf, &out_dir, &manifest).to_args();
        assert!(args.contains(&"--pages_per_file".to_string()));
        assert!(!args.contains(&"--ranges".to_string()));
    }

    #[test]
    fn rotate_arg_vector() {
        let pdf = PathBuf::from("/vault/book.pdf");
        let out_pdf = PathBuf::from("/vault/out/run-1/book.rotated.pdf");
        let manifest = PathBuf::from("/vault/out/run-1/manifest.json");
        let options = RotateForm {
            degrees: "180".to_string(),
            pages: "2-4".to_string(),
        }
        .build()
        .unwrap();

        let args = rotate_args(&options, &pdf, &out_pdf, &manifest).to_args();
        assert_eq!(
            args,
            vec![
                "rotate",
                "pdf",
                "--pdf",
                "/vault/book.pdf",
                "--out_pdf",
                "/vault/out/run-1/book.rotated.pdf",
                "--manifest",
                "/vault/out/run-1/manifest.json",
                "--degrees",
                "180",
                "--pages",
                "2-4",
            ]
        );
    }

    #[test]
    fn page_images_zero_trims_are_omitted() {
        let in_dir = PathBuf::from("/vault/scans");
        let out_dir = PathBuf::from("/vault/out/run-1");
        let manifest = PathBuf::from("/vault/out/run-1/manifest.json");
        let options = PageImagesForm {
            in_dir: "scans".to_string(),
            ..Default::default()
        }
        .build()
        .unwrap();

        let args = page_images_args(&options, &in_dir, &out_dir, &manifest).to_args();
        assert_eq!(
            args,
            vec![
                "page-images",
                "--in_dir",
                "/vault/scans",
                "--out_dir",
                "/vault/out/run-1",
                "--manifest",
                "/vault/out/run-1/manifest.json",
                "--glob",
                "*.png",
                "--mode",
                "auto",
            ]
        );
    }

    #[test]
    fn page_images_full_arg_vector() {
        let in_dir = PathBuf::from("/vault/scans");
        let out_dir = PathBuf::from("/vault/out/run-1");
        let manifest = PathBuf::from("/vault/out/run-1/manifest.json");
        let options = PageImagesForm {
            in_dir: "scans".to_string(),
            gutter_trim_px: "8".to_string(),
            edge_inset_px: "3".to_string(),
            overwrite: true,
            debug: true,
            ..Default::default()
        }
        .build()
        .unwrap();

        let args = page_images_args(&options, &in_dir, &out_dir, &manifest).to_args();
        let tail: Vec<&str> = args.iter().map(String::as_str).skip(11).collect();
        assert_eq!(
            tail,
            vec![
                "--gutter_trim_px",
                "8",
                "--edge_inset_px",
                "3",
                "--overwrite",
                "--debug",
            ]
        );
    }
}
