use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build hosts are not required to have protoc installed.
    if env::var_os("PROTOC").is_none() {
        env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    let proto_root = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("proto");
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("chainbench_descriptor.bin"))
        .type_attribute(".", "#[allow(clippy::all)]")
        .compile_protos(
            &[proto_root.join("chainbench/v1/benchmark.proto")],
            &[proto_root.clone()],
        )?;

    println!("cargo:rerun-if-changed={}", proto_root.display());
    Ok(())
}
