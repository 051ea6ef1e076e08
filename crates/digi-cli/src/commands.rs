use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;

use digi_sdk::{DigiConfig, ObjectKind, Session, TreeEntry};
use digi_store::TreeCodec;
use digi_types::ObjectId;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => DigiConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DigiConfig::default(),
    };
    let mut session = Session::with_config(config);
    match cli.command {
        Command::Build(args) => cmd_build(&mut session, args, &cli.format),
        Command::Graph(args) => cmd_graph(&mut session, args),
        Command::HashObject(args) => cmd_hash_object(&session, args, &cli.format),
        Command::Mktree(args) => cmd_mktree(&session, args, &cli.format),
    }
}

fn cmd_build(session: &mut Session, args: BuildArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let root = session.add_words(&args.words);
    let (leaves, height) = session
        .current_tree()
        .map(|t| (t.leaf_count(), t.height()))
        .unwrap_or_default();
    match format {
        OutputFormat::Json => {
            println!("{}", json!({ "root": root, "leaves": leaves, "height": height }));
        }
        OutputFormat::Text if root.is_empty() => {
            println!("{} No words given; tree is empty.", "!".yellow().bold());
        }
        OutputFormat::Text => {
            println!("{} {}", "Root:".bold(), root.cyan());
            println!("  Leaves: {leaves}, levels: {height}");
        }
    }
    Ok(())
}

fn cmd_graph(session: &mut Session, args: GraphArgs) -> anyhow::Result<()> {
    session.add_words(&args.words);
    let graph = session.graph();
    let out = if args.pretty {
        graph.to_json_pretty()?
    } else {
        graph.to_json()?
    };
    println!("{out}");
    Ok(())
}

fn cmd_hash_object(session: &Session, args: HashObjectArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let payload = match (&args.file, args.payload) {
        (Some(path), _) => std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, Some(inline)) => inline.into_bytes(),
        (None, None) => bail!("no payload given"),
    };
    let kind = if args.tree {
        TreeCodec::decode_payload(&payload).context("payload is not a valid tree")?;
        ObjectKind::Tree
    } else {
        ObjectKind::Blob
    };
    let hash = session.put_object(kind, payload)?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "kind": kind.to_string(), "hash": hash })),
        OutputFormat::Text => println!("{hash}"),
    }
    Ok(())
}

fn cmd_mktree(session: &Session, args: MktreeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let entries = args
        .entries
        .iter()
        .map(|entry| parse_entry(entry))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let hash = session.put_tree(&entries)?;
    let payload = TreeCodec::encode_payload(&entries)?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "hash": hash, "entries": entries })),
        OutputFormat::Text => {
            println!("{} {}", "Tree:".bold(), hash.cyan());
            println!("{}", String::from_utf8_lossy(&payload).dimmed());
        }
    }
    Ok(())
}

/// Parse `MODE:NAME:HASH`. The name may itself contain `:`.
fn parse_entry(raw: &str) -> anyhow::Result<TreeEntry> {
    let Some((mode, rest)) = raw.split_once(':') else {
        bail!("entry {raw:?} is not MODE:NAME:HASH");
    };
    let Some((name, hash)) = rest.rsplit_once(':') else {
        bail!("entry {raw:?} is not MODE:NAME:HASH");
    };
    if name.is_empty() {
        bail!("entry {raw:?} has an empty name");
    }
    let mode = u32::from_str_radix(mode, 8)
        .with_context(|| format!("entry {raw:?} has a non-octal mode"))?;
    let hash = ObjectId::from_hex(hash).with_context(|| format!("entry {raw:?} has a bad hash"))?;
    Ok(TreeEntry::new(name, mode, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use digi_sdk::EntryMode;

    #[test]
    fn parse_entry_reads_octal_mode() {
        let hash = "ab".repeat(32);
        let entry = parse_entry(&format!("100644:README.md:{hash}")).unwrap();
        assert_eq!(entry.name, "README.md");
        assert_eq!(entry.entry_mode(), Some(EntryMode::Regular));
        assert_eq!(entry.hash.to_hex(), hash);
    }

    #[test]
    fn parse_entry_allows_colons_in_name() {
        let hash = "00".repeat(32);
        let entry = parse_entry(&format!("40000:a:b:{hash}")).unwrap();
        assert_eq!(entry.name, "a:b");
        assert_eq!(entry.mode, 0o40000);
    }

    #[test]
    fn parse_entry_rejects_malformed_entries() {
        let hash = "00".repeat(32);
        assert!(parse_entry("no-separators").is_err());
        assert!(parse_entry(&format!("100644::{hash}")).is_err());
        assert!(parse_entry(&format!("9:x:{hash}")).is_err());
        assert!(parse_entry("100644:x:beef").is_err());
    }
}
