use crate::core::instance_header::InstanceHeader;
use crate::streams::{DelimitedFileStream, LineFormat};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::DelimitedFileParameters;
use std::sync::Arc;

pub(super) fn line_format(p: &DelimitedFileParameters) -> Result<LineFormat, BuildError> {
    if p.positive_label == p.negative_label {
        return Err(BuildError::InvalidParameter(format!(
            "positive and negative labels are both '{}'",
            p.positive_label
        )));
    }
    if p.placeholder == p.positive_label || p.placeholder == p.negative_label {
        return Err(BuildError::InvalidParameter(format!(
            "placeholder '{}' collides with a class label",
            p.placeholder
        )));
    }
    Ok(LineFormat::new(p.delimiter, p.class_index).with_placeholder(&p.placeholder))
}

fn header_for(p: &DelimitedFileParameters) -> Arc<InstanceHeader> {
    let relation = p
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    Arc::new(InstanceHeader::anonymous(
        relation,
        p.num_attributes,
        &p.positive_label,
        &p.negative_label,
    ))
}

impl TryFrom<&DelimitedFileParameters> for DelimitedFileStream {
    type Error = BuildError;

    fn try_from(p: &DelimitedFileParameters) -> Result<Self, Self::Error> {
        if p.num_attributes == 0 {
            return Err(BuildError::InvalidParameter(
                "num_attributes must be > 0".into(),
            ));
        }
        let stream = DelimitedFileStream::new(&p.path, header_for(p), line_format(p)?)?;
        Ok(stream.with_window(p.offset, p.limit)?)
    }
}
