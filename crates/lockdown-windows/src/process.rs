use lockdown_core::{ProcessId, ProcessSnapshot};

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
    TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_TERMINATE, TerminateProcess};

/// Exit code given to force-terminated processes.
const TERMINATED_EXIT_CODE: u32 = 1;

/// Closes the wrapped handle when dropped, on every return path.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was returned open by the OS and is closed
        // exactly once, here.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Takes a snapshot of running processes, keyed by pid.
///
/// Returns an empty map if the snapshot cannot be created or walked.
pub fn snapshot_processes() -> ProcessSnapshot {
    let mut processes = ProcessSnapshot::new();

    // SAFETY: CreateToolhelp32Snapshot returns an owned handle that the
    // guard closes. PROCESSENTRY32W is plain data with dwSize set as the
    // API requires.
    unsafe {
        let Ok(snapshot) = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) else {
            return processes;
        };
        let snapshot = OwnedHandle(snapshot);

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };
        if Process32FirstW(snapshot.0, &mut entry).is_err() {
            return processes;
        }
        loop {
            processes.insert(ProcessId(entry.th32ProcessID), exe_name(&entry));
            if Process32NextW(snapshot.0, &mut entry).is_err() {
                break;
            }
        }
    }

    processes
}

fn exe_name(entry: &PROCESSENTRY32W) -> String {
    let len = entry
        .szExeFile
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(entry.szExeFile.len());
    String::from_utf16_lossy(&entry.szExeFile[..len])
}

/// Terminates `pid` without giving it a chance to clean up.
///
/// Returns `false` if the process cannot be opened for termination
/// (insufficient rights, already exited) or termination fails.
pub fn terminate_process(pid: ProcessId) -> bool {
    // SAFETY: OpenProcess returns an owned handle that the guard closes
    // on both the success and failure paths of TerminateProcess.
    unsafe {
        let Ok(process) = OpenProcess(PROCESS_TERMINATE, false, pid.0) else {
            return false;
        };
        let process = OwnedHandle(process);
        TerminateProcess(process.0, TERMINATED_EXIT_CODE).is_ok()
    }
}
