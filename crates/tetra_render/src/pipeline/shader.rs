//! Shader compilation with diagnostics
//!
//! wgpu reports shader problems through compilation info and validation
//! errors. Both are captured here and written to the log; a broken shader
//! never aborts the program.

/// Outcome of compiling one shader module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderReport {
    /// Compiler errors, formatted with their source location
    pub errors: Vec<String>,
    /// Compiler warnings
    pub warnings: Vec<String>,
}

impl ShaderReport {
    /// True when no errors were reported
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collect messages from wgpu's compilation info
    pub fn from_compilation_info(info: &wgpu::CompilationInfo) -> Self {
        let mut report = Self::default();
        for message in &info.messages {
            let text = format_message(message);
            match message.message_type {
                wgpu::CompilationMessageType::Error => report.errors.push(text),
                wgpu::CompilationMessageType::Warning => report.warnings.push(text),
                wgpu::CompilationMessageType::Info => log::debug!("{}", text),
            }
        }
        report
    }

    /// Write the report to the log under the given shader label
    pub fn log(&self, label: &str) {
        for warning in &self.warnings {
            log::warn!("{} shader warning: {}", label, warning);
        }
        for error in &self.errors {
            log::error!("{} shader compilation failed: {}", label, error);
        }
    }
}

fn format_message(message: &wgpu::CompilationMessage) -> String {
    match &message.location {
        Some(loc) => format!(
            "{}:{}: {}",
            loc.line_number, loc.line_position, message.message
        ),
        None => message.message.clone(),
    }
}

/// Compile a WGSL module, logging any compile errors.
///
/// The returned module may be invalid; pipelines built from it will fail
/// to link, which [`create_pipeline_checked`] reports in turn.
pub fn compile_shader(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> (wgpu::ShaderModule, ShaderReport) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let scope_error = pollster::block_on(device.pop_error_scope());

    let mut report = ShaderReport::from_compilation_info(&pollster::block_on(
        module.get_compilation_info(),
    ));
    if let Some(err) = scope_error {
        // Validation failures without a compiler message still count
        if report.errors.is_empty() {
            report.errors.push(err.to_string());
        }
    }

    report.log(label);
    if report.is_ok() {
        log::debug!("{} shader compiled", label);
    }

    (module, report)
}

/// Create a render pipeline, logging a link failure instead of panicking.
///
/// Returns the pipeline together with a flag telling whether it linked.
pub fn create_pipeline_checked(
    device: &wgpu::Device,
    descriptor: &wgpu::RenderPipelineDescriptor,
) -> (wgpu::RenderPipeline, bool) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(descriptor);
    let linked = match pollster::block_on(device.pop_error_scope()) {
        Some(err) => {
            log::error!(
                "Shader program linking failed for {}: {}",
                descriptor.label.unwrap_or("pipeline"),
                err
            );
            false
        }
        None => true,
    };
    (pipeline, linked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(kind: wgpu::CompilationMessageType, text: &str, line: Option<u32>) -> wgpu::CompilationMessage {
        wgpu::CompilationMessage {
            message: text.to_string(),
            message_type: kind,
            location: line.map(|line_number| wgpu::SourceLocation {
                line_number,
                line_position: 5,
                offset: 0,
                length: 1,
            }),
        }
    }

    #[test]
    fn test_report_sorts_messages() {
        let info = wgpu::CompilationInfo {
            messages: vec![
                message(wgpu::CompilationMessageType::Error, "unknown type", Some(12)),
                message(wgpu::CompilationMessageType::Warning, "unused variable", None),
                message(wgpu::CompilationMessageType::Info, "note", None),
            ],
        };

        let report = ShaderReport::from_compilation_info(&info);
        assert!(!report.is_ok());
        assert_eq!(report.errors, vec!["12:5: unknown type".to_string()]);
        assert_eq!(report.warnings, vec!["unused variable".to_string()]);
    }

    #[test]
    fn test_empty_report_is_ok() {
        let info = wgpu::CompilationInfo { messages: vec![] };
        let report = ShaderReport::from_compilation_info(&info);
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
    }
}
