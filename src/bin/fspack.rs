use clap::{Parser, Subcommand};
use flatfs::{trim_zero, ByteSink, FileSystem, BLOCK_SIZE, MAX_NAME_LEN};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fspack", about = "Pack host files into a flatfs image")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a fresh image from host files
    Pack {
        /// Output image path
        #[arg(short, long)]
        output: PathBuf,
        /// Host files to pack
        files: Vec<PathBuf>,
    },
    /// List the files in an image
    List { image: PathBuf },
    /// Export one file from an image to the host
    Extract {
        image: PathBuf,
        name: String,
        /// Host path to write to
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete a file and rewrite the image
    Remove { image: PathBuf, name: String },
    /// Add host files to an existing image
    Add { image: PathBuf, files: Vec<PathBuf> },
}

/// Sink writing exported bytes to host paths.
struct HostSink;

impl ByteSink for HostSink {
    fn write(&mut self, destination: &str, data: &[u8]) -> flatfs::Result<()> {
        fs::write(destination, data).map_err(|_| flatfs::Error::IoError)
    }
}

fn pack_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return None;
    }
    Some(name.to_string())
}

fn add_files(fs_inst: &mut FileSystem, files: &[PathBuf]) -> std::io::Result<()> {
    for path in files {
        let Some(name) = pack_name(path) else {
            println!(
                "skipping {:?}: name missing or longer than {} bytes",
                path, MAX_NAME_LEN
            );
            continue;
        };
        let data = fs::read(path)?;
        match fs_inst.create(&name, &data) {
            Ok(slot) => println!(
                "packed {} ({} bytes, {} blocks, slot {})",
                name,
                data.len(),
                data.len().div_ceil(BLOCK_SIZE),
                slot
            ),
            Err(e) => println!("failed to pack {}: {:?}", name, e),
        }
    }
    Ok(())
}

fn load_image(path: &Path) -> std::io::Result<FileSystem> {
    let image = fs::read(path)?;
    Ok(FileSystem::from_image(&image).expect("invalid flatfs image"))
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Pack { output, files } => {
            let mut fs_inst = FileSystem::new();
            add_files(&mut fs_inst, &files)?;
            fs::write(&output, fs_inst.image())?;
            println!(
                "wrote {:?} ({} blocks free)",
                output,
                fs_inst.free_block_count()
            );
        }
        Command::List { image } => {
            let fs_inst = load_image(&image)?;
            for (slot, header) in fs_inst.files().expect("corrupt header table") {
                println!(
                    "slot {:3}  {:9}  {} blocks  {} bytes",
                    slot,
                    String::from_utf8_lossy(trim_zero(&header.name)),
                    header.blocks_used(),
                    header.size()
                );
            }
            println!("{} blocks free", fs_inst.free_block_count());
        }
        Command::Extract {
            image,
            name,
            output,
        } => {
            let fs_inst = load_image(&image)?;
            let dest = output.to_string_lossy();
            fs_inst
                .export(&name, &dest, &mut HostSink)
                .expect("export failed");
            println!("extracted {} to {:?}", name, output);
        }
        Command::Remove { image, name } => {
            let mut fs_inst = load_image(&image)?;
            fs_inst.delete(&name).expect("delete failed");
            fs::write(&image, fs_inst.image())?;
            println!("removed {}", name);
        }
        Command::Add { image, files } => {
            let mut fs_inst = load_image(&image)?;
            add_files(&mut fs_inst, &files)?;
            fs::write(&image, fs_inst.image())?;
        }
    }

    Ok(())
}
