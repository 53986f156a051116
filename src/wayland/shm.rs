use std::os::fd::{AsFd, AsRawFd, FromRawFd, OwnedFd};
use std::ptr::{self, NonNull};

use anyhow::{bail, Result};
use wayland_client::protocol::{wl_buffer::WlBuffer, wl_shm, wl_shm_pool::WlShmPool};
use wayland_client::QueueHandle;

use super::WaylandState;

/// Single ARGB8888 `wl_buffer` backed by a memfd mapping.
pub struct ShmBuffer {
    _fd: OwnedFd,
    pool: WlShmPool,
    buffer: WlBuffer,
    data: NonNull<u8>,
    len: usize,
}

impl ShmBuffer {
    pub fn new(
        shm: &wl_shm::WlShm,
        width: u32,
        height: u32,
        qh: &QueueHandle<WaylandState>,
    ) -> Result<Self> {
        let stride = width as usize * 4;
        let len = stride * height as usize;
        if len == 0 || len > i32::MAX as usize {
            bail!("Unsupported buffer size {}x{}", width, height);
        }

        let fd = unsafe {
            let raw = libc::memfd_create(b"wavefill-shm\0".as_ptr().cast(), libc::MFD_CLOEXEC);
            if raw < 0 {
                bail!("memfd_create failed: {}", std::io::Error::last_os_error());
            }
            OwnedFd::from_raw_fd(raw)
        };

        if unsafe { libc::ftruncate(fd.as_raw_fd(), len as libc::off_t) } < 0 {
            bail!("ftruncate failed: {}", std::io::Error::last_os_error());
        }

        let mapped = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd.as_raw_fd(),
                0,
            )
        };
        if mapped == libc::MAP_FAILED {
            bail!("mmap failed: {}", std::io::Error::last_os_error());
        }
        let Some(data) = NonNull::new(mapped.cast::<u8>()) else {
            bail!("mmap returned a null mapping");
        };

        let pool = shm.create_pool(fd.as_fd(), len as i32, qh, ());
        let buffer = pool.create_buffer(
            0,
            width as i32,
            height as i32,
            stride as i32,
            wl_shm::Format::Argb8888,
            qh,
            (),
        );

        Ok(Self {
            _fd: fd,
            pool,
            buffer,
            data,
            len,
        })
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        // the mapping lives as long as self and is only reachable through it
        unsafe { std::slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    pub fn wl_buffer(&self) -> &WlBuffer {
        &self.buffer
    }
}

impl Drop for ShmBuffer {
    fn drop(&mut self) {
        self.buffer.destroy();
        self.pool.destroy();
        unsafe {
            libc::munmap(self.data.as_ptr().cast(), self.len);
        }
    }
}
