use crate::traits::sample::Sample;

/// Ordered, owned sequence of samples for one [`Wave`](crate::Wave) codec.
///
/// Replaced wholesale on each read, appended to during synthesis and
/// serialized verbatim on write. Channels stay interleaved as stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer<T: Sample> {
    samples: Vec<T>,
}

impl<T: Sample> SampleBuffer<T> {
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Append samples to the end of the buffer.
    pub fn write(&mut self, samples: &[T]) {
        self.samples.extend_from_slice(samples);
    }

    pub fn push(&mut self, sample: T) {
        self.samples.push(sample);
    }

    /// Drop the current contents and take `samples` instead.
    pub fn replace(&mut self, samples: Vec<T>) {
        self.samples = samples;
    }

    /// Number of samples across all channels.
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.samples.iter()
    }
}

impl<T: Sample> From<Vec<T>> for SampleBuffer<T> {
    fn from(samples: Vec<T>) -> Self {
        Self { samples }
    }
}

impl<T: Sample> Extend<T> for SampleBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl<T: Sample> FromIterator<T> for SampleBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
