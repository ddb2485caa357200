//! Cross-subsystem integration tests.


#[cfg(test)]
mod concurrency;
#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
