use std::process;

fn main() {
    match ad_toc_cli::run() {
        Ok(code) => process::exit(code as i32),
        Err(err) => {
            eprintln!("ad-toc error: {err:#}");
            process::exit(ad_toc_cli::exit_code_for(&err) as i32);
        }
    }
}
