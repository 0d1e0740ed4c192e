//! Streaming batch conversion: results as they complete, not all at once.
//!
//! [`crate::convert::convert_batch`] holds every payload in memory until
//! the last input finishes. For large batches that is both slow to first
//! result and memory-hungry — a caller uploading payloads to a vision API
//! can ship each document's attachments while the next one renders. The
//! stream yields one [`BatchItem`] per input, in input order, with the
//! same per-input failure isolation as the collected variant.

use std::pin::Pin;

use futures::stream::{self, StreamExt};
use tokio_stream::Stream;

use crate::config::ConvertConfig;
use crate::convert;
use crate::output::BatchItem;

/// Stream of per-input batch results, in input order.
pub type BatchStream = Pin<Box<dyn Stream<Item = BatchItem> + Send>>;

/// Convert a batch of named blobs, yielding each input's outcome as soon
/// as its conversion finishes.
///
/// Inputs are processed strictly sequentially; the stream never reorders
/// results. An error item does not end the stream — remaining inputs are
/// still converted.
///
/// # Example
/// ```rust,no_run
/// use futures::StreamExt;
/// use pagepack::{convert_batch_stream, ConvertConfig};
///
/// # async fn run(inputs: Vec<(String, Vec<u8>)>) {
/// let config = ConvertConfig::default();
/// let mut results = convert_batch_stream(inputs, &config);
/// while let Some(item) = results.next().await {
///     match item.outcome {
///         Ok(output) => println!("{}: {} payload(s)", item.name, output.payloads.len()),
///         Err(e) => eprintln!("{}: {}", item.name, e),
///     }
/// }
/// # }
/// ```
pub fn convert_batch_stream(inputs: Vec<(String, Vec<u8>)>, config: &ConvertConfig) -> BatchStream {
    let config = config.clone();
    Box::pin(stream::iter(inputs).then(move |(name, bytes)| {
        let config = config.clone();
        async move {
            let outcome = convert::convert_input(bytes, name.clone(), &config).await;
            BatchItem { name, outcome }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn yields_items_in_input_order_with_isolation() {
        let good = png_bytes(&RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255])));
        let config = ConvertConfig::default();

        let items: Vec<BatchItem> = convert_batch_stream(
            vec![
                ("first.png".to_string(), good.clone()),
                ("broken".to_string(), b"????".to_vec()),
                ("third.png".to_string(), good),
            ],
            &config,
        )
        .collect()
        .await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "first.png");
        assert!(items[0].outcome.is_ok());
        assert!(matches!(
            items[1].outcome,
            Err(ConvertError::UnsupportedFormat { .. })
        ));
        assert!(items[2].outcome.is_ok());
    }

    #[tokio::test]
    async fn empty_batch_is_an_empty_stream() {
        let config = ConvertConfig::default();
        let items: Vec<BatchItem> = convert_batch_stream(vec![], &config).collect().await;
        assert!(items.is_empty());
    }
}
