//! String joining.
//!
//! The delimiter only ever sits between two elements; empty input finishes to
//! `prefix + suffix`. Partitions are merged in partition order, so the runner
//! yields source order in every mode.

use crate::error::Result;
use crate::reducer::Reducer;

/// Joins `stringify(item)` values with `delimiter`, wrapped in `prefix`/`suffix`.
#[derive(Clone, Debug)]
pub struct Joining<F> {
    delimiter: String,
    prefix: String,
    suffix: String,
    stringify: F,
}

/// Join with `delimiter`, using each element's `ToString` form.
pub fn joining<T: ToString>(delimiter: &str) -> Joining<fn(&T) -> String> {
    joining_with(delimiter, "", "")
}

/// Join with `delimiter` and wrap the whole result in `prefix`/`suffix`.
pub fn joining_with<T: ToString>(
    delimiter: &str,
    prefix: &str,
    suffix: &str,
) -> Joining<fn(&T) -> String> {
    let stringify: fn(&T) -> String = T::to_string;
    Joining::new(delimiter, prefix, suffix, stringify)
}

impl<F> Joining<F> {
    /// Fully specified joiner with a custom stringifier.
    pub fn new(delimiter: &str, prefix: &str, suffix: &str, stringify: F) -> Self {
        Joining {
            delimiter: delimiter.to_owned(),
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
            stringify,
        }
    }

    /// Replace the per-element stringifier.
    pub fn with_stringifier<G>(self, stringify: G) -> Joining<G> {
        Joining {
            delimiter: self.delimiter,
            prefix: self.prefix,
            suffix: self.suffix,
            stringify,
        }
    }

    fn push_part(&self, acc: &mut Option<String>, part: &str) {
        match acc {
            Some(body) => {
                body.push_str(&self.delimiter);
                body.push_str(part);
            }
            None => *acc = Some(part.to_owned()),
        }
    }
}

impl<T, F> Reducer<T> for Joining<F>
where
    F: Fn(&T) -> String + Send + Sync,
{
    // `None` until the first element, so an empty input has no delimiter.
    type Acc = Option<String>;
    type Output = String;

    fn create(&self) -> Option<String> {
        None
    }

    fn add_input(&self, acc: &mut Option<String>, item: T) -> Result<()> {
        let part = (self.stringify)(&item);
        self.push_part(acc, &part);
        Ok(())
    }

    fn merge(&self, acc: &mut Option<String>, other: Option<String>) -> Result<()> {
        if let Some(body) = other {
            self.push_part(acc, &body);
        }
        Ok(())
    }

    fn finish(&self, acc: Option<String>) -> Result<String> {
        let body = acc.unwrap_or_default();
        let mut out = String::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(&body);
        out.push_str(&self.suffix);
        Ok(out)
    }
}
