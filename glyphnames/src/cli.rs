//! Command line access to a name table

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use crate::{parse_nam, Codepoints, Error, NameRole, Resolver, TableIndex};

/// Look up glyph names in a .nam table
#[derive(Clone, Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    /// The table of curated glyph names
    pub nam_path: PathBuf,
    /// Codepoint sequences to resolve, e.g. 00B5, 0x2126 or 0066+0069
    pub queries: Vec<Codepoints>,
    /// Kind of name to resolve, one of production/friendly/alternate/synonym
    #[arg(short, long, default_value_t)]
    pub role: NameRole,
    /// Glyph names to map back to codepoints
    #[arg(short, long)]
    pub name: Vec<String>,
    /// Print the problems found in the table
    #[arg(long)]
    pub conflicts: bool,
    /// Dump every resolved name in the table, as json or yaml
    #[arg(short, long)]
    pub export: Option<ExportFormat>,
    /// Optional destination path for writing output. Default is stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static ERR_MSG: &str = "expected one of 'json', 'yaml'";
        match s.to_ascii_lowercase().trim() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ERR_MSG),
        }
    }
}

/// Load the table named in `args` and write the requested output.
pub fn run(args: &Args) -> Result<(), Error> {
    let text = fs::read_to_string(&args.nam_path).map_err(|inner| Error::Load {
        path: args.nam_path.clone(),
        inner,
    })?;
    let records = parse_nam(&text).map_err(|inner| Error::Nam {
        path: args.nam_path.clone(),
        inner,
    })?;
    let (index, report) = TableIndex::build(records);
    let resolver = Resolver::new(&index);

    let mut write_target: Box<dyn Write> = match args.out.as_ref() {
        Some(path) => File::create(path)
            .map_err(|inner| Error::FileWrite {
                path: path.to_owned(),
                inner,
            })
            .map(|f| Box::new(BufWriter::new(f)))?,
        None => Box::new(std::io::stdout()),
    };

    if args.conflicts {
        for conflict in report.iter() {
            writeln!(&mut write_target, "{conflict}")?;
        }
    }

    for query in args.queries.iter() {
        let resolution = resolver.resolve(query, args.role)?;
        writeln!(&mut write_target, "{query}\t{resolution}")?;
    }

    for name in args.name.iter() {
        match resolver.name_to_codepoints(name) {
            Some(codepoints) => writeln!(&mut write_target, "{name}\t{codepoints}")?,
            None => writeln!(&mut write_target, "{name}\tnot found")?,
        }
    }

    match args.export {
        Some(ExportFormat::Json) => {
            serde_json::to_writer_pretty(&mut write_target, &resolver.export())?;
            writeln!(&mut write_target)?;
        }
        Some(ExportFormat::Yaml) => {
            serde_yaml::to_writer(&mut write_target, &resolver.export())?;
        }
        None => (),
    }

    write_target.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use tempfile::{tempdir, TempDir};

    use super::*;

    static TABLE: &str = "\
% test table
0x00B2 twosuperior
0x00B5 >mu
0x2126 >Ohm
0x2126 !ohm
0x0394 Delta
0x2206 Delta
";

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = tempdir().unwrap();
        let nam_path = temp_dir.path().join("standard.nam");
        fs::write(&nam_path, TABLE).unwrap();
        let out = temp_dir.path().join("out.txt");
        (temp_dir, nam_path, out)
    }

    fn args(nam_path: &Path, out: &Path, extra: &[&str]) -> Args {
        let mut argv = vec![
            "glyphnames".to_string(),
            nam_path.display().to_string(),
            "-o".to_string(),
            out.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn resolve_queries() {
        let (_dir, nam_path, out) = setup();
        run(&args(&nam_path, &out, &["00B2", "0x00B5", "0066+0069"])).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "0x00B2\ttwosuperior\n0x00B5\tuni00B5\n0x0066 0x0069\tuni0066_uni0069\n"
        );
    }

    #[test]
    fn resolve_synonyms_and_reverse() {
        let (_dir, nam_path, out) = setup();
        let args = args(
            &nam_path,
            &out,
            &["2126", "--role", "synonym", "-n", "Ohm", "-n", "nope"],
        );
        run(&args).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "0x2126\tohm\nOhm\t0x2126\nnope\tnot found\n"
        );
    }

    #[test]
    fn report_conflicts() {
        let (_dir, nam_path, out) = setup();
        run(&args(&nam_path, &out, &["--conflicts"])).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "name reused for 0x2206: 'Delta' already maps to 0x0394\n"
        );
    }

    #[test]
    fn export_json() {
        let (_dir, nam_path, out) = setup();
        run(&args(&nam_path, &out, &["--export", "json"])).unwrap();
        let exported: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(exported["0x2126"]["production"], "uni2126");
        assert_eq!(exported["0x2126"]["synonym"][0], "ohm");
        assert_eq!(exported["0x00B2"]["friendly"][0], "twosuperior");
        // a name reused for a second key is still exported under it
        assert_eq!(exported["0x2206"]["production"], "Delta");
    }

    #[test]
    fn export_yaml() {
        let (_dir, nam_path, out) = setup();
        run(&args(&nam_path, &out, &["-e", "YAML"])).unwrap();
        let exported: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(exported["0x00B5"]["production"].as_str(), Some("uni00B5"));
    }

    #[test]
    fn bad_role() {
        assert!(Args::try_parse_from(["glyphnames", "x.nam", "-r", "nickname"]).is_err());
    }

    #[test]
    fn bad_query() {
        assert!(Args::try_parse_from(["glyphnames", "x.nam", "D800"]).is_err());
    }

    #[test]
    fn missing_table() {
        let temp_dir = tempdir().unwrap();
        let args = Args::try_parse_from([
            "glyphnames".into(),
            temp_dir.path().join("missing.nam"),
        ])
        .unwrap();
        assert!(matches!(run(&args), Err(Error::Load { .. })));
    }

    #[test]
    fn invalid_table() {
        let (_dir, nam_path, out) = setup();
        fs::write(&nam_path, "0x0041 A\n0x0042\n").unwrap();
        let err = run(&args(&nam_path, &out, &[])).unwrap_err();
        assert!(matches!(err, Error::Nam { ref inner, .. } if inner.line == 2));
    }
}
