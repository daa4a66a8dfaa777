// Build script to embed Windows version resources into the bridge DLL and harness.

fn main() {
    // Only compile resources on Windows.
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set("FileDescription", "DDE execute bridge");
        res.set("ProductName", "ddeclient");
        res.set("OriginalFilename", "ddeclient.dll");

        if let Err(e) = res.compile() {
            eprintln!("Warning: Failed to compile Windows resources: {}", e);
            eprintln!("The bridge will be built without version information.");
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
