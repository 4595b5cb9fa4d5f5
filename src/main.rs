use std::env;
use std::fs;

use mmn14_assembler::assemble_source;

const MAX_FILE_NAME_LEN: usize = 255;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: mmn14-assembler <file> [file...]");
        eprintln!("files required");
        std::process::exit(1);
    }

    for name in &args {
        process_file(name);
    }
}

fn process_file(name: &str) {
    if name.len() > MAX_FILE_NAME_LEN {
        eprintln!("{}: file name too long", name);
        return;
    }

    let input_path = format!("{name}.as");
    let source = match fs::read_to_string(&input_path) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{input_path}: cannot open input file ({err})");
            return;
        }
    };

    let outcome = assemble_source(&source);
    // The intermediate file is useful to inspect even when the file doesn't
    // compile, so it's written regardless of the outcome below.
    let _ = fs::write(format!("{name}.am"), &outcome.expanded_text);

    if outcome.errors.is_empty() {
        println!("{name}: compilation completed successfully, {} lines parsed", outcome.lines_parsed);
        if let Some(ob) = &outcome.object_file {
            let _ = fs::write(format!("{name}.ob"), ob);
        }
        if let Some(ent) = &outcome.entries_file {
            let _ = fs::write(format!("{name}.ent"), ent);
        }
        if let Some(ext) = &outcome.externals_file {
            let _ = fs::write(format!("{name}.ext"), ext);
        }
    } else {
        for err in &outcome.errors {
            eprintln!("{name}: {err}");
        }
        eprintln!("{name}: number of errors: {}; compilation not completed", outcome.errors.len());
    }
}
