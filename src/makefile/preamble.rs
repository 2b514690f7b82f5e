//! Side-channel capture preamble.
//!
//! `ndk-build` does not report the include paths and flags it settled on.
//! The preamble makes it write them into the file named by
//! `$(ANDROID_MAVEN_PLUGIN_LOCAL_C_INCLUDES_FILE)` while it evaluates the
//! makefile; [`super::capture`] reads that file back.

/// Make variable naming the capture file.
pub const MAKEFILE_CAPTURE_FILE: &str = "ANDROID_MAVEN_PLUGIN_LOCAL_C_INCLUDES_FILE";

/// The five capture lines. The first truncates the file, the rest append.
pub const CAPTURE_PREAMBLE: &str = "\
$(shell echo \"LOCAL_C_INCLUDES=$(LOCAL_C_INCLUDES)\" > $(ANDROID_MAVEN_PLUGIN_LOCAL_C_INCLUDES_FILE))
$(shell echo \"LOCAL_PATH=$(LOCAL_PATH)\" >> $(ANDROID_MAVEN_PLUGIN_LOCAL_C_INCLUDES_FILE))
$(shell echo \"LOCAL_MODULE_FILENAME=$(LOCAL_MODULE_FILENAME)\" >> $(ANDROID_MAVEN_PLUGIN_LOCAL_C_INCLUDES_FILE))
$(shell echo \"LOCAL_MODULE=$(LOCAL_MODULE)\" >> $(ANDROID_MAVEN_PLUGIN_LOCAL_C_INCLUDES_FILE))
$(shell echo \"LOCAL_CFLAGS=$(LOCAL_CFLAGS)\" >> $(ANDROID_MAVEN_PLUGIN_LOCAL_C_INCLUDES_FILE))
";

/// Comment line following the preamble.
pub const GENERATED_HEADER: &str = "# Generated by prebuilt-mk\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_shape() {
        let lines: Vec<&str> = CAPTURE_PREAMBLE.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.contains(&format!("$({})", MAKEFILE_CAPTURE_FILE))));
        assert!(lines[0].contains("\" > $("));
        assert!(lines[1..].iter().all(|l| l.contains("\" >> $(")));
    }
}
