//! Expansion of configured steps into tasks.
//!
//! Directory listings are read here, once, before any task runs. Listings only
//! ever name source directories, so nothing a task writes can change them.

use std::path::PathBuf;

use tracing::debug;

use crate::action::migrations::migration_files;
use crate::action::{BuildContext, Compile, Concat, LicenseEntry, Licenses, Migrations, Revision, Templates};
use crate::config::{Listing, Step, Tools};
use crate::pipeline::PipelineError;
use crate::task::Task;
use crate::util::fs::{dir_list, dir_tree};

fn list(ctx: &BuildContext, listing: &Listing) -> Result<Vec<PathBuf>, PipelineError> {
  let dir = ctx.resolve(&listing.dir);
  if listing.optional && !dir.exists() {
    debug!(dir = %dir.display(), "optional directory missing, skipping");
    return Ok(Vec::new());
  }
  dir_list(&dir, &listing.suffix, &listing.prefix).map_err(|e| PipelineError::List { dir, source: e })
}

fn list_all(ctx: &BuildContext, listings: &[Listing]) -> Result<Vec<PathBuf>, PipelineError> {
  let mut files = Vec::new();
  for listing in listings {
    files.extend(list(ctx, listing)?);
  }
  Ok(files)
}

/// Expand one step into the tasks it declares, appending them to `tasks`.
pub(crate) fn expand_step(
  ctx: &BuildContext,
  tools: &Tools,
  step: &Step,
  tasks: &mut Vec<Task>,
) -> Result<(), PipelineError> {
  match step {
    Step::Templates {
      output,
      dir,
      suffix,
      module,
      prefix,
    } => {
      let dir = ctx.resolve(dir);
      let files = dir_tree(&dir, suffix).map_err(|e| PipelineError::List {
        dir: dir.clone(),
        source: e,
      })?;
      let action = Templates::new(module.as_str(), &dir, prefix.as_str(), files.clone());
      tasks.push(Task::new(ctx.target(output), files, action));
    }

    Step::Concat {
      output,
      inputs,
      dirs,
      lint,
    } => {
      let mut sources: Vec<PathBuf> = inputs.iter().map(|i| ctx.resolve(i)).collect();
      sources.extend(list_all(ctx, dirs)?);
      let mut action = Concat::new(sources.clone());
      if *lint {
        action = action.with_lint(tools.lint.clone());
      }
      tasks.push(Task::new(ctx.target(output), sources, action));
    }

    Step::CopyEach { target_dir, dirs } => {
      for file in list_all(ctx, dirs)? {
        let Some(name) = file.file_name() else {
          continue;
        };
        let output = ctx.target(target_dir).join(name);
        tasks.push(Task::new(output, vec![file.clone()], Concat::new(vec![file])));
      }
    }

    Step::Sass { output, main, partials } => {
      let main = ctx.resolve(main);
      let mut inputs = vec![main.clone()];
      inputs.extend(list_all(ctx, partials)?);
      tasks.push(Task::new(ctx.target(output), inputs, Compile::new(tools.sass.clone(), main)));
    }

    Step::Revision {
      output,
      template,
      outputs,
    } => {
      let template = ctx.resolve(template);
      let mut inputs = vec![template.clone()];
      inputs.extend(outputs.iter().map(|o| ctx.target(o)));
      tasks.push(Task::new(ctx.target(output), inputs, Revision::new(template)));
    }

    Step::Licenses { output, entries, dirs } => {
      let mut entries = entries.clone();
      for file in list_all(ctx, dirs)? {
        let name = file
          .file_name()
          .map(|n| n.to_string_lossy().into_owned())
          .unwrap_or_default();
        entries.push(LicenseEntry {
          name,
          files: vec![file.to_string_lossy().into_owned()],
        });
      }
      let action = Licenses::new(entries);
      let inputs: Vec<PathBuf> = action.files().map(|f| ctx.resolve(f)).collect();
      tasks.push(Task::new(ctx.target(output), inputs, action));
    }

    Step::Migrations { output, dir } => {
      let dir = ctx.resolve(dir);
      let files = migration_files(&dir).map_err(|e| PipelineError::List {
        dir: dir.clone(),
        source: e,
      })?;
      let mut inputs = vec![dir];
      inputs.extend(files.iter().cloned());
      tasks.push(Task::new(ctx.target(output), inputs, Migrations::new(files)));
    }
  }

  Ok(())
}
