use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use linegrep::Regex;

const USAGE: &str = "usage: linegrep [-r] -E <pattern> [path ...]";

// Usage: echo <input_text> | linegrep -E <pattern>
//        linegrep [-r] -E <pattern> <path>...
//
// Exit codes follow grep: 0 if any line matched, 1 if none, 2 on usage
// errors (including a pattern that fails to compile).
fn main() {
    match run() {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("linegrep: {err:#}");
            process::exit(2);
        }
    }
}

fn run() -> Result<bool> {
    let mut recursive = false;
    let mut pattern = None;
    let mut paths: Vec<PathBuf> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-r" if pattern.is_none() => recursive = true,
            "-E" if pattern.is_none() => {
                pattern = Some(args.next().with_context(|| USAGE.to_string())?);
            }
            _ if pattern.is_some() => paths.push(PathBuf::from(arg)),
            _ => bail!("{USAGE}"),
        }
    }
    let Some(pattern) = pattern else {
        bail!("{USAGE}");
    };
    let regex = Regex::new(&pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;

    if recursive && paths.is_empty() {
        paths.push(PathBuf::from("."));
    }
    if paths.is_empty() {
        return grep_stdin(&regex);
    }

    let mut files = Vec::new();
    for path in &paths {
        if recursive {
            collect_files(path, &mut files);
        } else if path.is_dir() {
            eprintln!("linegrep: {}: is a directory", path.display());
        } else {
            files.push(path.clone());
        }
    }
    // grep only prefixes output once more than one file is in play.
    let prefix = recursive || files.len() > 1;
    let mut found = false;
    for file in &files {
        found |= grep_file(&regex, file, prefix);
    }
    Ok(found)
}

fn grep_stdin(regex: &Regex) -> Result<bool> {
    let mut found = false;
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if regex.is_match(&line) {
            println!("{line}");
            found = true;
        }
    }
    Ok(found)
}

/// Matching lines of one file, prefixed `name:line` when searching more
/// than one file. An unreadable file is reported and skipped.
fn grep_file(regex: &Regex, path: &Path, prefix: bool) -> bool {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("linegrep: {}: {err}", path.display());
            return false;
        }
    };
    let mut found = false;
    for line in contents.lines() {
        if regex.is_match(line) {
            if prefix {
                println!("{}:{line}", path.display());
            } else {
                println!("{line}");
            }
            found = true;
        }
    }
    found
}

fn collect_files(path: &Path, out: &mut Vec<PathBuf>) {
    if !path.is_dir() {
        out.push(path.to_path_buf());
        return;
    }
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("linegrep: {}: {err}", path.display());
            return;
        }
    };
    for entry in entries.flatten() {
        collect_files(&entry.path(), out);
    }
}
