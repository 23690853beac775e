//! Rendering of a winning address for terminal or machine consumption.

use std::io::{self, Write};

use cepa_core::Address;

/// Renders a race winner. Called at most once per race, only on success.
pub trait Presenter {
    /// Render `address`.
    ///
    /// # Errors
    /// Propagates write failures from the underlying sink.
    fn present(&mut self, address: &Address) -> io::Result<()>;
}

const RULE: &str = "=============================";

/// Human-readable block, one field per line.
#[derive(Debug)]
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    /// Render into `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, a: &Address) -> io::Result<()> {
        writeln!(self.out, "CEP found")?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "Winning API: {}", a.provider)?;
        writeln!(self.out, "CEP: {}", a.cep)?;
        writeln!(self.out, "Street: {}", a.street)?;
        writeln!(self.out, "Neighborhood: {}", a.neighborhood)?;
        writeln!(self.out, "City: {}", a.city)?;
        writeln!(self.out, "State: {}", a.state)?;
        writeln!(self.out, "Source: {}", a.source)?;
        writeln!(self.out, "{RULE}")?;
        self.out.flush()
    }
}

/// One JSON object per line.
#[derive(Debug)]
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    /// Render into `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, a: &Address) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, a)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
