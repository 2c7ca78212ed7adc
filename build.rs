use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // use a bundled protoc unless the environment already names one
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }
    tonic_build::compile_protos("proto/movieapi.proto")?;
    Ok(())
}
