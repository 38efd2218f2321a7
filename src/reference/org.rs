// src/reference/org.rs - Organization name resolution
use log::debug;
use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use crate::reference::context::ReferenceContext;
use crate::reference::entry::OrgEntry;
use crate::reference::error::Result;
use crate::utils::text::{is_blank, tokenize};

/// Resolves free-text organization names against the organization map.
///
/// Every miss writes `Failed lookup |<token>|` to the diagnostic sink. The line is
/// advisory and independent of the log level.
pub struct OrgResolver<'a> {
    context: &'a ReferenceContext,
    diagnostics: RefCell<Box<dyn Write + 'a>>,
    failures: Cell<usize>,
}

impl<'a> OrgResolver<'a> {
    pub fn new(context: &'a ReferenceContext) -> Self {
        Self::with_diagnostics(context, Box::new(io::stderr()))
    }

    pub fn with_diagnostics(context: &'a ReferenceContext, diagnostics: Box<dyn Write + 'a>) -> Self {
        Self {
            context,
            diagnostics: RefCell::new(diagnostics),
            failures: Cell::new(0),
        }
    }

    /// Resolve `name`. Blank names give `None`; unknown names give an
    /// `unknown`-scope placeholder.
    pub fn resolve(&self, name: Option<&str>) -> Result<Option<Rc<OrgEntry>>> {
        let name = match name {
            Some(name) if !is_blank(Some(name)) => name,
            _ => return Ok(None),
        };

        let table = self.context.org_table()?;
        let token = tokenize(name);
        if let Some(entry) = table.get(&token) {
            return Ok(Some(Rc::clone(entry)));
        }

        self.failures.set(self.failures.get() + 1);
        if let Err(e) = writeln!(self.diagnostics.borrow_mut(), "Failed lookup |{}|", token) {
            debug!("Could not write lookup diagnostic: {}", e);
        }
        Ok(Some(Rc::new(OrgEntry::unknown(name))))
    }

    /// Number of lookups that fell back to a placeholder.
    pub fn failures(&self) -> usize {
        self.failures.get()
    }
}
