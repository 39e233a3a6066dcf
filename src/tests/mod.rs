// Test modules for JayDB
