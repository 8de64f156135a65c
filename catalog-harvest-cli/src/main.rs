use anyhow::{Context, Result};
use catalog_harvest::{
    parse_document, CatalogConfig, DefaultParserFactory, Level, LookupTables, Messages, ParseContext,
    Record, RecordArchive,
};
use clap::Parser;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 入力XMLファイル、ZIPファイル（MEF）、またはディレクトリ
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// 出力ディレクトリ
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// カタログのURL（ハーベスターがアクセスするURL）
    #[arg(long, value_name = "URL", default_value = "http://localhost:8080/geonetwork")]
    catalog_url: String,

    /// 公開URL（リンク生成時に内部URLを置き換える）
    #[arg(long, value_name = "URL")]
    public_url: Option<String>,

    /// カタログのバージョン（ビューアリンクの形式を決める）
    #[arg(long, value_name = "VERSION", default_value = "3.0")]
    catalog_version: String,

    /// メタデータスキーマ（省略時はルート要素から判定）
    #[arg(long, value_name = "SCHEMA")]
    schema: Option<String>,

    /// 並列処理スレッド数（デフォルト: CPUコア数）
    #[arg(short, long)]
    threads: Option<usize>,

    /// ERRORメッセージのあるレコードを失敗として扱う
    #[arg(long)]
    strict: bool,
}

/// Shared state for every worker.
struct Harvester {
    config: CatalogConfig,
    tables: LookupTables,
    factory: DefaultParserFactory,
}

impl Harvester {
    fn new(args: &Args) -> Self {
        let mut config = CatalogConfig::new(&args.catalog_url);
        if let Some(public_url) = &args.public_url {
            config = config.with_public_url(public_url);
        }
        Self {
            config,
            tables: LookupTables::new(),
            factory: DefaultParserFactory::new(),
        }
    }

    fn context(&self) -> ParseContext<'_> {
        ParseContext::new(&self.config, &self.tables)
    }
}

#[derive(Serialize)]
struct HarvestOutput<'a> {
    record: &'a Record,
    messages: &'a Messages,
}

fn main() -> Result<()> {
    // ログの初期化（RUST_LOGで変更可能）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // CLI引数の解析
    let args = Args::parse();

    // 処理開始時間を記録
    let start_time = std::time::Instant::now();

    // スレッドプールの設定
    if let Some(threads) = args.threads {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to build thread pool")?;
    }

    // 出力ディレクトリの作成
    fs::create_dir_all(&args.output)?;

    let harvester = Harvester::new(&args);

    // 入力パスの処理
    if args.input.is_file() {
        let ext = args
            .input
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match ext {
            "zip" => {
                // ZIPファイルの処理
                info!("Processing ZIP file: {:?}", args.input);
                process_zip_file(&args.input, &args, &harvester)?;
            }
            "xml" => {
                // XMLファイルの処理
                info!("Processing XML file: {:?}", args.input);
                process_file(&args.input, &args, &harvester)?;
            }
            _ => {
                error!("Unsupported file type: {:?}", args.input);
                anyhow::bail!("Input file must be .xml or .zip");
            }
        }
    } else if args.input.is_dir() {
        // ディレクトリの処理
        info!("Processing directory: {:?}", args.input);
        process_directory(&args.input, &args, &harvester)?;
    } else {
        error!("Invalid input path: {:?}", args.input);
        anyhow::bail!("Input path must be a file or directory");
    }

    // 処理時間を表示
    let elapsed = start_time.elapsed();
    info!("Total processing time: {:?}", elapsed);

    Ok(())
}

fn new_record(args: &Args) -> Record {
    let mut record = Record::new().with_catalog_version(&args.catalog_version);
    record.schema_id = args.schema.clone();
    record
}

fn process_file(path: &Path, args: &Args, harvester: &Harvester) -> Result<()> {
    let xml = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("record");

    harvest_record(new_record(args), &xml, fallback, args, harvester)
}

fn process_zip_file(path: &Path, args: &Args, harvester: &Harvester) -> Result<()> {
    let entries = RecordArchive::new(path).entries()?;
    let total = entries.len();
    info!("Harvesting {} records from {:?}", total, path);

    // 失敗したレコードがあっても残りのレコードは処理する
    let mut failures = Vec::new();
    for entry in entries {
        let mut record = entry.record;
        if record.schema_id.is_none() {
            record.schema_id = args.schema.clone();
        }
        record.catalog_version = Some(args.catalog_version.clone());

        // アーカイブ内のパスを出力ファイル名の候補にする
        let fallback = entry.path.trim_end_matches(".xml");
        if let Err(e) = harvest_record(record, &entry.xml, fallback, args, harvester) {
            error!("{}!{}: {:#}", path.display(), entry.path, e);
            failures.push(entry.path);
        }
    }

    if !failures.is_empty() {
        anyhow::bail!(
            "{} of {} records failed: {}",
            failures.len(),
            total,
            failures.join(", ")
        );
    }

    Ok(())
}

fn harvest_record(
    mut record: Record,
    xml: &str,
    fallback_name: &str,
    args: &Args,
    harvester: &Harvester,
) -> Result<()> {
    let mut messages = Messages::new();
    let parsed = parse_document(
        &mut record,
        xml,
        &harvester.factory,
        &harvester.context(),
        &mut messages,
    );
    if !parsed {
        warn!("Skipped {}: the document could not be parsed", fallback_name);
        return Ok(());
    }

    let name = record.known_id().unwrap_or(fallback_name).to_string();
    if args.strict && messages.has_errors() {
        anyhow::bail!(
            "Record {} has {} errors",
            name,
            messages.count(Level::Error)
        );
    }

    let output_path = args.output.join(format!("{}.json", output_file_name(&name)));
    let output = HarvestOutput {
        record: &record,
        messages: &messages,
    };
    fs::write(&output_path, serde_json::to_string_pretty(&output)?)?;
    info!("Written {:?} ({} messages)", output_path, messages.len());

    Ok(())
}

/// レコードIDをファイル名として使える形にする（区切り文字などは `_` に置き換える）
fn output_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn process_directory(dir: &Path, args: &Args, harvester: &Harvester) -> Result<()> {
    use rayon::prelude::*;

    // XML/ZIPファイルを再帰的に収集
    let input_files = collect_input_files(dir)?;
    info!("Found {} input files (XML/ZIP)", input_files.len());

    // 並列処理でレコードを変換
    let results: Vec<Result<()>> = input_files
        .par_iter()
        .map(|(path, file_type)| match file_type {
            FileType::Xml => process_file(path, args, harvester),
            FileType::Zip => process_zip_file(path, args, harvester),
        })
        .collect();

    // エラーをチェック
    let mut errors = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        if let Err(e) = result {
            errors.push(format!("{}: {:#}", input_files[i].0.display(), e));
        }
    }

    if !errors.is_empty() {
        error!("Failed to process {} files:", errors.len());
        for err in &errors {
            error!("  {}", err);
        }
        anyhow::bail!("{} files failed to process", errors.len());
    }

    Ok(())
}

fn collect_input_files(dir: &Path) -> Result<Vec<(PathBuf, FileType)>> {
    use rayon::prelude::*;
    use std::sync::Mutex;

    let files = Mutex::new(Vec::new());

    let entries: Result<Vec<_>, _> = fs::read_dir(dir)?.collect();
    let entries = entries?;

    // エントリを並列処理
    entries
        .into_par_iter()
        .try_for_each(|entry| -> Result<()> {
            let path = entry.path();

            let found = if path.is_dir() {
                // サブディレクトリを再帰的に探索
                collect_input_files(&path)?
            } else {
                match path.extension().and_then(|s| s.to_str()) {
                    Some("xml") => vec![(path, FileType::Xml)],
                    Some("zip") => vec![(path, FileType::Zip)],
                    _ => Vec::new(),
                }
            };
            if !found.is_empty() {
                files
                    .lock()
                    .map_err(|_| anyhow::anyhow!("file list lock poisoned"))?
                    .extend(found);
            }
            Ok(())
        })?;

    let mut files = files
        .into_inner()
        .map_err(|_| anyhow::anyhow!("file list lock poisoned"))?;
    // 出力順を安定させる
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

#[derive(Debug, Clone, Copy)]
enum FileType {
    Xml,
    Zip,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn legacy_record(id: &str, thumbnail: &str) -> String {
        format!(
            r#"<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd" xmlns:gco="http://www.isotc211.org/2005/gco">
  <gmd:fileIdentifier><gco:CharacterString>{}</gco:CharacterString></gmd:fileIdentifier>
  <gmd:identificationInfo><gmd:MD_DataIdentification>
    <gmd:graphicOverview><gmd:MD_BrowseGraphic>
      <gmd:fileName><gco:CharacterString>{}</gco:CharacterString></gmd:fileName>
      <gmd:fileDescription><gco:CharacterString>thumbnail</gco:CharacterString></gmd:fileDescription>
    </gmd:MD_BrowseGraphic></gmd:graphicOverview>
  </gmd:MD_DataIdentification></gmd:identificationInfo>
</gmd:MD_Metadata>"#,
            id, thumbnail
        )
    }

    fn write_archive(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        // 1件目はサムネイルURLが不正（ERROR）、2件目は正常
        zip.start_file("a/bad.xml", options).unwrap();
        zip.write_all(legacy_record("bad/record", "http://").as_bytes())
            .unwrap();
        zip.start_file("b/good.xml", options).unwrap();
        zip.write_all(legacy_record("good-record", "thumb.png").as_bytes())
            .unwrap();
        zip.finish().unwrap();
    }

    fn args(input: &Path, output: &Path, strict: bool) -> Args {
        let mut argv = vec![
            "catalog-harvest".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        if strict {
            argv.push("--strict".to_string());
        }
        Args::parse_from(argv)
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("65f61d2d-fe4e-48e5"), "65f61d2d-fe4e-48e5");
        assert_eq!(output_file_name("bad/record"), "bad_record");
        assert_eq!(output_file_name("a\\b:c d"), "a_b_c_d");
    }

    #[test]
    fn test_strict_archive_keeps_harvesting_after_a_failure() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("export.zip");
        let output = dir.path().join("out");
        fs::create_dir_all(&output).unwrap();
        write_archive(&zip_path);

        let args = args(&zip_path, &output, true);
        let harvester = Harvester::new(&args);
        let result = process_zip_file(&zip_path, &args, &harvester);

        let err = result.expect_err("the bad record must fail in strict mode");
        assert!(format!("{:#}", err).contains("1 of 2 records failed"));
        assert!(output.join("good-record.json").exists());
        assert!(!output.join("bad_record.json").exists());
    }

    #[test]
    fn test_archive_without_strict_writes_every_record() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("export.zip");
        let output = dir.path().join("out");
        fs::create_dir_all(&output).unwrap();
        write_archive(&zip_path);

        let args = args(&zip_path, &output, false);
        let harvester = Harvester::new(&args);
        process_zip_file(&zip_path, &args, &harvester).unwrap();

        assert!(output.join("good-record.json").exists());
        let written = fs::read_to_string(output.join("bad_record.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["record"]["id"], "bad/record");
        assert_eq!(json["messages"][0]["level"], "ERROR");
        assert!(json["messages"][0]["text"]
            .as_str()
            .is_some_and(|text| text.starts_with("Invalid metadata thumbnail URL")));
    }
}
