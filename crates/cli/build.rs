use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("lingua")
        .version("1.0.0")
        .author("Lingua Contributors")
        .about("Look up definitions, encyclopedia entries and synonyms")
        .arg(clap::arg!(<WORD> "Word to look up"))
        .arg(clap::arg!(-v --vocabolario "Dictionary definition from the Treccani vocabolario (default)"))
        .arg(clap::arg!(-s --sinonimo "Synonyms from sinonimi.it"))
        .arg(clap::arg!(-e --enciclopedia "Entry from the Treccani enciclopedia"))
        .group(clap::ArgGroup::new("mode").args(["vocabolario", "sinonimo", "enciclopedia"]))
        .arg(
            clap::arg!(--input <FILE> "Read a saved page from FILE (or '-' for stdin) instead of fetching")
                .value_name("FILE"),
        )
        .arg(
            clap::arg!(--rules <FILE> "Extraction rules JSON file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--plain "Disable bold and italic escapes in the output"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "lingua", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "lingua", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "lingua", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "lingua", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
