use console::{Style, Term};
use std::io::{self, Write};

pub struct DisplayOptions {
    pub color_support: bool,
    pub trailing_newline: bool,
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

pub fn write_password<W: Write>(
    out: &mut W,
    password: &str,
    options: &DisplayOptions,
) -> io::Result<()> {
    out.write_all(password.as_bytes())?;
    if options.trailing_newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

pub fn format_error(err: &anyhow::Error, options: &DisplayOptions) -> String {
    let style = if options.color_support {
        Style::new().red().bold()
    } else {
        Style::new()
    };

    // Walk the chain so "failed to read random sequence" keeps its cause.
    let message = err
        .chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ");

    format!("{} {}", style.apply_to("error:"), message)
}

pub fn report_error(err: &anyhow::Error, options: &DisplayOptions) {
    let term = Term::stderr();
    let line = format_error(err, options);
    if term.write_line(&line).is_err() {
        eprintln!("{}", line);
    }
}
